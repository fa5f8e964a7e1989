//! linewal Binary
//!
//! Runs the demo append workload, or one of the maintenance modes.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use linewal::wal::LogReader;
use linewal::workload::Workload;
use linewal::{CommitEngine, Config, LogWriter, RecoveryDriver, RecoveryOutcome};
use tracing_subscriber::{fmt, EnvFilter};

/// linewal
#[derive(Parser, Debug)]
#[command(name = "linewal")]
#[command(about = "Minimal write-ahead log with atomic commit and crash recovery")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./linewal_data")]
    data_dir: String,

    /// Number of records the demo workload appends
    #[arg(short, long, default_value = "1000")]
    count: u64,

    /// Delay between demo appends in milliseconds
    #[arg(long, default_value = "10")]
    delay_ms: u64,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Commit a leftover WAL, if there is one
    Recover,

    /// Apply the WAL to the store and clear it
    Commit,

    /// Append a single payload
    Append {
        /// The payload to log
        payload: String,
    },

    /// Check the WAL without modifying anything
    Verify,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,linewal=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    tracing::info!("linewal v{}", linewal::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);

    let config = Config::builder().data_dir(&args.data_dir).build();

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args, config: &Config) -> linewal::Result<()> {
    match args.mode {
        Some(Mode::Recover) => match RecoveryDriver::new(config)?.recover()? {
            RecoveryOutcome::NothingToRecover => {}
            RecoveryOutcome::Recovered(report) => {
                tracing::info!(
                    "Recovered {} records ({} corrupted lines skipped)",
                    report.records_applied,
                    report.records_corrupted
                );
            }
        },
        Some(Mode::Commit) => {
            CommitEngine::new(config)?.commit()?;
        }
        Some(Mode::Append { payload }) => {
            let record = LogWriter::open(config)?.append(payload)?;
            tracing::info!("Appended to WAL (crc={:08x})", record.checksum());
        }
        Some(Mode::Verify) => {
            let summary = LogReader::new(config).verify()?;
            println!(
                "valid={} corrupt={} blank={}",
                summary.valid, summary.corrupt, summary.blank
            );
        }
        None => {
            // Leftover records from a crashed run are committed before new appends
            RecoveryDriver::new(config)?.recover()?;

            let workload = Workload {
                count: args.count,
                delay: Duration::from_millis(args.delay_ms),
            };
            let mut writer = LogWriter::open(config)?;
            let appended = workload.run(&mut writer)?;
            tracing::info!("Workload finished, {} records appended", appended);
        }
    }
    Ok(())
}
