//! WAL Reader
//!
//! Scans the log from the start and classifies every non-blank line as a
//! valid record or a corrupted one. Corruption never stops the scan; only
//! I/O failures do.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

use super::{CorruptReason, Record, RECORD_SEPARATOR};

/// Read-only view of a log file
#[derive(Debug, Clone)]
pub struct LogReader {
    path: PathBuf,
}

/// Classification of one non-blank log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Valid(Record),
    Corrupt(CorruptReason),
}

/// One non-blank line from the log
#[derive(Debug, Clone)]
pub struct ScannedLine {
    /// 1-based line number in the file
    pub line_number: u64,

    /// Raw line bytes, without the trailing newline
    pub raw: Vec<u8>,

    pub outcome: LineOutcome,
}

/// Counts produced by a read-only integrity check
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub valid: u64,
    pub corrupt: u64,
    pub blank: u64,
}

impl LogReader {
    /// Reader for the log configured in `config`
    pub fn new(config: &Config) -> Self {
        Self::open_path(config.log_path())
    }

    /// Reader for the log at an explicit path
    pub fn open_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start a scan from the beginning of the log
    ///
    /// A missing log yields an empty scan. Each call reopens the file, so a
    /// scan can be restarted at any time.
    pub fn scan(&self) -> Result<LogScan> {
        let reader = match File::open(&self.path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(LogScan {
            reader,
            line_number: 0,
            blank_lines: 0,
            buf: Vec::new(),
        })
    }

    /// Scan the whole log without touching it and count line classes
    pub fn verify(&self) -> Result<ScanSummary> {
        let mut scan = self.scan()?;
        let mut summary = ScanSummary::default();

        for line in scan.by_ref() {
            match line?.outcome {
                LineOutcome::Valid(_) => summary.valid += 1,
                LineOutcome::Corrupt(_) => summary.corrupt += 1,
            }
        }
        summary.blank = scan.blank_lines();

        Ok(summary)
    }
}

/// Lazy iterator over the non-blank lines of a log
pub struct LogScan {
    reader: Option<BufReader<File>>,
    line_number: u64,
    blank_lines: u64,
    buf: Vec<u8>,
}

impl LogScan {
    /// Number of blank lines skipped so far
    pub fn blank_lines(&self) -> u64 {
        self.blank_lines
    }

    fn read_line(&mut self) -> io::Result<bool> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(false);
        };

        self.buf.clear();
        let n = reader.read_until(RECORD_SEPARATOR, &mut self.buf)?;
        if n == 0 {
            // Done; drop the handle now rather than when the scan is dropped
            self.reader = None;
            return Ok(false);
        }
        if self.buf.last() == Some(&RECORD_SEPARATOR) {
            self.buf.pop();
        }
        self.line_number += 1;
        Ok(true)
    }
}

impl Iterator for LogScan {
    type Item = Result<ScannedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read_line() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => {
                    self.reader = None;
                    return Some(Err(e.into()));
                }
            }

            if self.buf.iter().all(u8::is_ascii_whitespace) {
                self.blank_lines += 1;
                continue;
            }

            let outcome = match Record::parse(&self.buf) {
                Ok(record) => LineOutcome::Valid(record),
                Err(reason) => {
                    tracing::warn!(
                        line = self.line_number,
                        %reason,
                        "WAL corrupted line skipped: {}",
                        String::from_utf8_lossy(&self.buf)
                    );
                    LineOutcome::Corrupt(reason)
                }
            };

            return Some(Ok(ScannedLine {
                line_number: self.line_number,
                raw: self.buf.clone(),
                outcome,
            }));
        }
    }
}
