//! Write-Ahead Log (WAL) Module
//!
//! Provides durability guarantees through append-only logging.
//!
//! ## Responsibilities
//! - Append checksummed records, each forced to disk before returning
//! - CRC32 checksums for corruption detection
//! - Scan the log and separate valid records from damaged lines
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ 1b9f3a07|SET key0=0\n                    │
//! │ ┌──────────────┬───┬─────────┬────┐      │
//! │ │ CRC32 (8 hex)│ | │ Payload │ \n │      │
//! │ └──────────────┴───┴─────────┴────┘      │
//! ├──────────────────────────────────────────┤
//! │ ... one record per line, append order    │
//! └──────────────────────────────────────────┘
//! ```

mod record;
mod writer;
mod reader;

pub use record::{CorruptReason, Record, FIELD_SEPARATOR, RECORD_SEPARATOR};
pub use writer::LogWriter;
pub use reader::{LineOutcome, LogReader, LogScan, ScanSummary, ScannedLine};
