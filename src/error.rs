//! Error types for linewal
//!
//! Provides a unified error type for all operations. Corrupted log lines are
//! not errors: they surface as [`CorruptReason`](crate::wal::CorruptReason)
//! tags on individual scanned lines.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using WalError
pub type Result<T> = std::result::Result<T, WalError>;

/// Unified error type for linewal operations
#[derive(Debug, Error)]
pub enum WalError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Log Writer Errors
    // -------------------------------------------------------------------------
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Log {0:?} already has an open writer")]
    WriterBusy(PathBuf),

    // -------------------------------------------------------------------------
    // Commit Errors
    // -------------------------------------------------------------------------
    /// The store was replaced but the log could not be removed. The next
    /// commit will apply the same records again.
    #[error("Store committed but log {path:?} could not be removed: {source}")]
    LogCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
