//! Commit Engine
//!
//! Folds the validated log into the store.
//!
//! ## Sequence
//! 1. Read the current store (empty if absent)
//! 2. Scan the log, keeping valid records in file order
//! 3. Write store + records to the staging file and fsync it
//! 4. Rename the staging file over the store (atomic replace)
//! 5. Delete the log
//!
//! A crash between 4 and 5 leaves an already-applied log behind, and the next
//! commit appends the same records again. Nothing here detects that.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, WalError};
use crate::fsync::sync_dir;
use crate::wal::{LineOutcome, LogReader};

/// Applies the log to the store
///
/// Not safe to run concurrently with another commit or with a writer on the
/// same log.
#[derive(Debug, Clone)]
pub struct CommitEngine {
    data_dir: PathBuf,
    store_path: PathBuf,
    staging_path: PathBuf,
    reader: LogReader,
}

/// Result of steps 1-4 (store replaced, log untouched)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    /// Records merged into the store
    pub records_applied: u64,

    /// Lines skipped because they failed parsing or checksum verification
    pub records_corrupted: u64,

    /// Size of the store after the replace, in bytes
    pub store_len: u64,
}

/// Result of a full commit
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommitReport {
    pub records_applied: u64,
    pub records_corrupted: u64,
    pub store_len: u64,

    /// Whether a log file existed and was removed
    pub log_removed: bool,
}

impl CommitEngine {
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            data_dir: config.data_dir.clone(),
            store_path: config.store_path(),
            staging_path: config.staging_path(),
            reader: LogReader::new(config),
        })
    }

    /// Apply the log to the store and delete the log
    ///
    /// Safe to call with the log absent, the store absent, or both.
    pub fn commit(&self) -> Result<CommitReport> {
        let applied = self.apply()?;
        let log_removed = self.clear_log()?;

        tracing::info!(
            applied = applied.records_applied,
            corrupted = applied.records_corrupted,
            store_len = applied.store_len,
            "Commit finished, WAL cleared"
        );

        Ok(CommitReport {
            records_applied: applied.records_applied,
            records_corrupted: applied.records_corrupted,
            store_len: applied.store_len,
            log_removed,
        })
    }

    /// Merge the validated log into the store without deleting the log
    ///
    /// Leaves the system in the state a crash right after the rename would:
    /// calling `apply` or `commit` again re-applies the same records.
    pub fn apply(&self) -> Result<ApplyReport> {
        fs::create_dir_all(&self.data_dir)?;

        let mut content = match fs::read(&self.store_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let mut report = ApplyReport::default();
        for line in self.reader.scan()? {
            match line?.outcome {
                LineOutcome::Valid(record) => {
                    content.extend_from_slice(&record.store_line());
                    report.records_applied += 1;
                }
                LineOutcome::Corrupt(_) => report.records_corrupted += 1,
            }
        }

        if let Err(e) = self.write_staging(&content) {
            // Abandon the staging file; the store is untouched
            let _ = fs::remove_file(&self.staging_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&self.staging_path, &self.store_path) {
            let _ = fs::remove_file(&self.staging_path);
            return Err(e.into());
        }
        // The log must not be deleted before the rename is durable
        sync_dir(&self.data_dir)?;

        report.store_len = content.len() as u64;
        tracing::debug!(
            applied = report.records_applied,
            "replaced store {:?}",
            self.store_path
        );

        Ok(report)
    }

    /// Delete the log after a successful apply
    ///
    /// Returns `false` if there was no log to delete.
    pub fn clear_log(&self) -> Result<bool> {
        let log_path = self.reader.path();
        match fs::remove_file(log_path) {
            Ok(()) => {
                sync_dir(&self.data_dir)?;
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                tracing::error!(
                    "store replaced but WAL {:?} could not be removed, its records will be applied again: {}",
                    log_path,
                    e
                );
                Err(WalError::LogCleanup {
                    path: log_path.to_path_buf(),
                    source: e,
                })
            }
        }
    }

    pub fn log_path(&self) -> &Path {
        self.reader.path()
    }

    fn write_staging(&self, content: &[u8]) -> Result<()> {
        let mut file = File::create(&self.staging_path)?;
        file.write_all(content)?;
        file.flush()?;
        file.sync_all()?;
        Ok(())
    }
}
