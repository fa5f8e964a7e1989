//! WAL Writer
//!
//! Handles appending records to the WAL file.
//!
//! Every append is its own open / write / flush / fsync / close cycle, so a
//! record is on stable storage before `append` returns and nothing is
//! buffered across calls.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::checksum;
use crate::config::Config;
use crate::error::{Result, WalError};
use crate::fsync::sync_dir;

use super::{Record, RECORD_SEPARATOR};

/// Log paths that currently have a live writer in this process
static OPEN_WRITERS: Mutex<Vec<PathBuf>> = parking_lot::const_mutex(Vec::new());

/// Exclusive append handle for one log file
///
/// Only one `LogWriter` per log file can exist in a process at a time; the
/// claim is keyed on the canonical path of the log's directory, so different
/// spellings of the same path collide. It is released when the writer is
/// dropped. Other processes are not excluded, so callers must still
/// guarantee a single writer across processes.
#[derive(Debug)]
pub struct LogWriter {
    path: PathBuf,
    /// Canonical path held in `OPEN_WRITERS`
    key: PathBuf,
    appended: u64,
}

impl LogWriter {
    /// Claim the log configured in `config`
    ///
    /// Creates the data directory if needed; the log itself is created by
    /// the first append.
    pub fn open(config: &Config) -> Result<Self> {
        config.validate()?;
        Self::open_path(config.log_path())
    }

    /// Claim the log at an explicit path
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let key = Self::registry_key(&path)?;

        let mut open = OPEN_WRITERS.lock();
        if open.contains(&key) {
            return Err(WalError::WriterBusy(path));
        }
        open.push(key.clone());

        Ok(Self {
            path,
            key,
            appended: 0,
        })
    }

    /// Append a payload to the log and force it to stable storage
    ///
    /// If an earlier append was torn (the log does not end with a newline),
    /// a newline is written first so the fragment stays on its own line and
    /// this record remains readable. Returns the record that was written.
    pub fn append(&mut self, payload: impl Into<Vec<u8>>) -> Result<Record> {
        let record = Record::new(payload)?;

        let dir = self.dir().to_path_buf();
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(&dir)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;

        let len = file.metadata()?.len();
        let mut buf = Vec::new();
        if len > 0 && !ends_with_separator(&mut file)? {
            tracing::warn!("WAL {:?} ends with a torn record, terminating it", self.path);
            buf.push(RECORD_SEPARATOR);
        }
        buf.extend_from_slice(&record.encode());

        file.write_all(&buf)?;
        file.flush()?;
        file.sync_all()?;
        drop(file);

        // A new log is only durable once its directory entry is
        if len == 0 {
            sync_dir(&dir)?;
        }

        self.appended += 1;
        tracing::debug!(
            checksum = %checksum::format_hex(record.checksum()),
            len = record.payload().len(),
            "appended record to {:?}",
            self.path
        );

        Ok(record)
    }

    /// Number of records appended through this handle
    pub fn appended(&self) -> u64 {
        self.appended
    }

    /// Path of the log this writer owns
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Canonical form of `path`: canonical parent directory plus file name
    fn registry_key(path: &Path) -> Result<PathBuf> {
        let file_name = path.file_name().ok_or_else(|| {
            WalError::Config(format!("log path {:?} has no file name", path))
        })?;

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        Ok(parent.canonicalize()?.join(file_name))
    }
}

/// Whether the last byte of a non-empty log is the record separator
fn ends_with_separator(file: &mut File) -> io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == RECORD_SEPARATOR)
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let mut open = OPEN_WRITERS.lock();
        if let Some(pos) = open.iter().position(|p| p == &self.key) {
            open.swap_remove(pos);
        }
    }
}
