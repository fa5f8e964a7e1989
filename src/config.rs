//! Configuration for linewal
//!
//! Centralized configuration with sensible defaults. Every component is
//! constructed from a `Config`, so separate instances never share paths.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{Result, WalError};

/// Main configuration for a linewal instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── wal.log          (write-ahead log)
    ///     ├── db.txt           (committed store)
    ///     └── db.txt.tmp       (staging file, only during a commit)
    pub data_dir: PathBuf,

    /// File name of the write-ahead log inside `data_dir`
    pub log_file_name: String,

    /// File name of the committed store inside `data_dir`
    pub store_file_name: String,

    /// Suffix appended to the store file name for the staging file
    pub staging_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./linewal_data"),
            log_file_name: "wal.log".to_string(),
            store_file_name: "db.txt".to_string(),
            staging_suffix: ".tmp".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Path of the write-ahead log
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.log_file_name)
    }

    /// Path of the committed store
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store_file_name)
    }

    /// Path of the staging file used while a commit is in flight
    pub fn staging_path(&self) -> PathBuf {
        let mut name = OsString::from(&self.store_file_name);
        name.push(&self.staging_suffix);
        self.data_dir.join(name)
    }

    /// Check that the three file paths are usable and distinct
    pub fn validate(&self) -> Result<()> {
        if self.log_file_name.is_empty() {
            return Err(WalError::Config("log file name is empty".to_string()));
        }
        if self.store_file_name.is_empty() {
            return Err(WalError::Config("store file name is empty".to_string()));
        }
        if self.staging_suffix.is_empty() {
            return Err(WalError::Config(
                "staging suffix is empty, staging file would alias the store".to_string(),
            ));
        }
        if self.log_file_name == self.store_file_name {
            return Err(WalError::Config(format!(
                "log and store share the file name {:?}",
                self.log_file_name
            )));
        }
        if self.staging_path() == self.log_path() {
            return Err(WalError::Config(
                "staging file would alias the log".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the log file name
    pub fn log_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.log_file_name = name.into();
        self
    }

    /// Set the store file name
    pub fn store_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.store_file_name = name.into();
        self
    }

    /// Set the staging file suffix
    pub fn staging_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.staging_suffix = suffix.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
