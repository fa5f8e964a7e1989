//! Commit and recovery integration tests

mod recovery_tests;
