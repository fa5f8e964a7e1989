//! Demonstration workload
//!
//! Appends `SET key{i}={i}` payloads one at a time with a pause between
//! them, so a process can be killed mid-run to exercise recovery.

use std::thread;
use std::time::Duration;

use crate::error::Result;
use crate::wal::LogWriter;

/// Sequential append workload
#[derive(Debug, Clone, Copy)]
pub struct Workload {
    /// Number of records to append
    pub count: u64,

    /// Pause after each append
    pub delay: Duration,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            count: 1000,
            delay: Duration::from_millis(10),
        }
    }
}

impl Workload {
    /// Payload for the `i`-th record
    pub fn payload(i: u64) -> String {
        format!("SET key{}={}", i, i)
    }

    /// Append every payload through `writer`, stopping at the first error
    pub fn run(&self, writer: &mut LogWriter) -> Result<u64> {
        tracing::info!("Appending {} records to {:?}", self.count, writer.path());
        for i in 0..self.count {
            let payload = Self::payload(i);
            let record = writer.append(payload.as_str())?;
            tracing::info!(
                "Appended to WAL: {} (crc={:08x})",
                payload,
                record.checksum()
            );
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }
        Ok(self.count)
    }
}
