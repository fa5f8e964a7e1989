//! Tests for the Recovery Driver

use std::fs;

use linewal::{CommitEngine, Config, LogWriter, RecoveryDriver, RecoveryOutcome};
use tempfile::TempDir;

use crate::log_capture::capture_logs;

fn setup_temp_config() -> (TempDir, Config) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder().data_dir(temp_dir.path()).build();
    (temp_dir, config)
}

#[test]
fn test_nothing_to_recover_leaves_store_untouched() {
    let (_temp, config) = setup_temp_config();
    fs::write(config.store_path(), "SET a=1\n").unwrap();

    let outcome = RecoveryDriver::new(&config).unwrap().recover().unwrap();

    assert_eq!(outcome, RecoveryOutcome::NothingToRecover);
    assert_eq!(fs::read_to_string(config.store_path()).unwrap(), "SET a=1\n");
}

#[test]
fn test_nothing_to_recover_is_reported() {
    let (_temp, config) = setup_temp_config();
    let driver = RecoveryDriver::new(&config).unwrap();

    let (outcome, logs) = capture_logs(|| driver.recover().unwrap());

    assert_eq!(outcome, RecoveryOutcome::NothingToRecover);
    assert!(logs.contains("No WAL to recover"), "logs were: {}", logs);
}

#[test]
fn test_nothing_to_recover_does_not_create_store() {
    let (_temp, config) = setup_temp_config();

    let outcome = RecoveryDriver::new(&config).unwrap().recover().unwrap();

    assert_eq!(outcome, RecoveryOutcome::NothingToRecover);
    assert!(!config.store_path().exists());
}

#[test]
fn test_recover_commits_leftover_log() {
    let (_temp, config) = setup_temp_config();
    {
        let mut writer = LogWriter::open(&config).unwrap();
        writer.append("SET key0=0").unwrap();
        writer.append("SET key1=1").unwrap();
        // Writer dropped without a commit: simulates a crash
    }

    let outcome = RecoveryDriver::new(&config).unwrap().recover().unwrap();

    match outcome {
        RecoveryOutcome::Recovered(report) => {
            assert_eq!(report.records_applied, 2);
            assert!(report.log_removed);
        }
        other => panic!("Expected Recovered, got {:?}", other),
    }
    assert_eq!(
        fs::read_to_string(config.store_path()).unwrap(),
        "SET key0=0\nSET key1=1\n"
    );
    assert!(!config.log_path().exists());
}

#[test]
fn test_recover_twice_is_idempotent() {
    let (_temp, config) = setup_temp_config();
    LogWriter::open(&config).unwrap().append("SET a=1").unwrap();
    let driver = RecoveryDriver::new(&config).unwrap();

    driver.recover().unwrap();
    let second = driver.recover().unwrap();

    assert_eq!(second, RecoveryOutcome::NothingToRecover);
    assert_eq!(fs::read_to_string(config.store_path()).unwrap(), "SET a=1\n");
}

#[test]
fn test_recover_after_partial_commit_duplicates() {
    let (_temp, config) = setup_temp_config();
    LogWriter::open(&config).unwrap().append("SET a=1").unwrap();
    CommitEngine::new(&config).unwrap().apply().unwrap();

    let outcome = RecoveryDriver::new(&config).unwrap().recover().unwrap();

    assert!(matches!(outcome, RecoveryOutcome::Recovered(_)));
    assert_eq!(
        fs::read_to_string(config.store_path()).unwrap(),
        "SET a=1\nSET a=1\n"
    );
}

#[test]
fn test_recover_with_torn_tail() {
    let (_temp, config) = setup_temp_config();
    LogWriter::open(&config).unwrap().append("SET a=1").unwrap();
    // Partial append cut off by a crash
    let mut content = fs::read(config.log_path()).unwrap();
    content.extend_from_slice(b"1234");
    fs::write(config.log_path(), content).unwrap();

    let outcome = RecoveryDriver::new(&config).unwrap().recover().unwrap();

    match outcome {
        RecoveryOutcome::Recovered(report) => {
            assert_eq!(report.records_applied, 1);
            assert_eq!(report.records_corrupted, 1);
        }
        other => panic!("Expected Recovered, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(config.store_path()).unwrap(), "SET a=1\n");
}

#[test]
fn test_append_after_crash_is_recovered() {
    let (_temp, config) = setup_temp_config();
    // Crash mid-append leaves a record with no newline
    fs::write(config.log_path(), "1b9f3a").unwrap();

    // Restart appends without recovering first
    LogWriter::open(&config).unwrap().append("SET key0=0").unwrap();

    let outcome = RecoveryDriver::new(&config).unwrap().recover().unwrap();

    match outcome {
        RecoveryOutcome::Recovered(report) => {
            assert_eq!(report.records_applied, 1);
            assert_eq!(report.records_corrupted, 1);
        }
        other => panic!("Expected Recovered, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(config.store_path()).unwrap(), "SET key0=0\n");
}
