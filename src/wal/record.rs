//! WAL Record definitions
//!
//! A record is one line of the log: `<crc32 hex>|<payload>\n`. The payload is
//! opaque; the only restriction is that it cannot contain the record
//! separator, since lines are not escaped.

use thiserror::Error;

use crate::checksum;
use crate::error::{Result, WalError};

/// Separates the checksum field from the payload
pub const FIELD_SEPARATOR: u8 = b'|';

/// Terminates every record in both the log and the store
pub const RECORD_SEPARATOR: u8 = b'\n';

/// A single checksummed record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    checksum: u32,
    payload: Vec<u8>,
}

/// Why a log line was classified as corrupted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorruptReason {
    #[error("missing '|' separator")]
    MissingSeparator,

    #[error("checksum field {0:?} is not 1-8 hex digits")]
    InvalidChecksum(String),

    #[error("checksum mismatch: stored {stored:08x}, computed {computed:08x}")]
    ChecksumMismatch { stored: u32, computed: u32 },
}

impl Record {
    /// Build a record for `payload`, computing its checksum
    ///
    /// Fails with `InvalidPayload` if the payload contains a newline.
    pub fn new(payload: impl Into<Vec<u8>>) -> Result<Self> {
        let payload = payload.into();
        if let Some(pos) = payload.iter().position(|&b| b == RECORD_SEPARATOR) {
            return Err(WalError::InvalidPayload(format!(
                "payload contains a newline at byte {}",
                pos
            )));
        }
        Ok(Self {
            checksum: checksum::compute(&payload),
            payload,
        })
    }

    /// Parse one log line (without its terminating newline)
    ///
    /// The line is split on the first `|`; everything after it is payload,
    /// including further `|` bytes.
    pub fn parse(line: &[u8]) -> std::result::Result<Self, CorruptReason> {
        let sep = line
            .iter()
            .position(|&b| b == FIELD_SEPARATOR)
            .ok_or(CorruptReason::MissingSeparator)?;

        let (field, rest) = line.split_at(sep);
        let payload = &rest[1..];

        let stored = checksum::parse_hex(field).ok_or_else(|| {
            CorruptReason::InvalidChecksum(String::from_utf8_lossy(field).into_owned())
        })?;

        let computed = checksum::compute(payload);
        if stored != computed {
            return Err(CorruptReason::ChecksumMismatch { stored, computed });
        }

        Ok(Self {
            checksum: stored,
            payload: payload.to_vec(),
        })
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Encode as a log line, newline included
    pub fn encode(&self) -> Vec<u8> {
        let mut line = Vec::with_capacity(checksum::HEX_WIDTH + self.payload.len() + 2);
        line.extend_from_slice(checksum::format_hex(self.checksum).as_bytes());
        line.push(FIELD_SEPARATOR);
        line.extend_from_slice(&self.payload);
        line.push(RECORD_SEPARATOR);
        line
    }

    /// Encode as a store line: the payload followed by a newline
    pub fn store_line(&self) -> Vec<u8> {
        let mut line = Vec::with_capacity(self.payload.len() + 1);
        line.extend_from_slice(&self.payload);
        line.push(RECORD_SEPARATOR);
        line
    }
}
