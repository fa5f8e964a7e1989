//! Recovery Driver
//!
//! Startup entry point: if a log survived the last run, commit it.

use crate::commit::{CommitEngine, CommitReport};
use crate::config::Config;
use crate::error::Result;

/// Runs the commit sequence for a leftover log
#[derive(Debug, Clone)]
pub struct RecoveryDriver {
    engine: CommitEngine,
}

/// What `recover` found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryOutcome {
    /// No log on disk; the store was not touched
    NothingToRecover,

    /// A log was present and has been committed
    Recovered(CommitReport),
}

impl RecoveryDriver {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            engine: CommitEngine::new(config)?,
        })
    }

    /// Commit a leftover log, if any
    ///
    /// Call once at startup, before a `LogWriter` accepts new appends.
    pub fn recover(&self) -> Result<RecoveryOutcome> {
        let log_path = self.engine.log_path();
        if !log_path.try_exists()? {
            tracing::info!("No WAL to recover");
            return Ok(RecoveryOutcome::NothingToRecover);
        }

        tracing::info!("Recovering WAL {:?}", log_path);
        let report = self.engine.commit()?;
        Ok(RecoveryOutcome::Recovered(report))
    }
}
