//! # linewal
//!
//! A minimal write-ahead-log durability layer:
//! - Checksummed, line-oriented log records
//! - Every append forced to stable storage before it is acknowledged
//! - Commit by atomic replace of the store, then log deletion
//! - Idempotent startup recovery for a leftover log
//!
//! ## Architecture Overview
//!
//! ```text
//!   append(payload)                         recover()
//!        │                                      │
//!        ▼                                      ▼
//!   ┌──────────┐                        ┌──────────────┐
//!   │LogWriter │                        │RecoveryDriver│
//!   │(exclusive│                        └──────┬───────┘
//!   │  handle) │                               │ log present?
//!   └────┬─────┘                               ▼
//!        │ crc|payload\n  + fsync       ┌──────────────┐
//!        ▼                              │ CommitEngine │
//!   ┌──────────┐   scan (Valid|Corrupt) │              │
//!   │ wal.log  │ ─────────────────────▶ │ store + valid│
//!   └──────────┘      LogReader         │   ─▶ staging │
//!                                       │   ─▶ rename  │
//!                                       │   ─▶ rm log  │
//!                                       └──────┬───────┘
//!                                              ▼
//!                                       ┌──────────────┐
//!                                       │    db.txt    │
//!                                       └──────────────┘
//! ```
//!
//! ## Constraints
//! - Single writer, single process. `LogWriter` is exclusive per log path
//!   inside one process; nothing prevents a second process from appending.
//! - Commit and recovery must not run concurrently with each other or with
//!   appends.
//! - A crash after the store replace but before the log is deleted makes the
//!   next commit apply the same records a second time.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod checksum;
pub mod wal;
pub mod commit;
pub mod recovery;
pub mod workload;

mod fsync;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{WalError, Result};
pub use config::Config;
pub use commit::{ApplyReport, CommitEngine, CommitReport};
pub use recovery::{RecoveryDriver, RecoveryOutcome};
pub use wal::{LogReader, LogWriter};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of linewal
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
