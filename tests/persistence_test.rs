#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::{NamedTempFile, tempdir};

mod common;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: reward one dining
    let csv1 = NamedTempFile::new().unwrap();
    common::write_dinings(csv1.path(), &[("100.00", "1234567890123456", "1234567890")]).unwrap();

    let output1 = Command::new(cargo_bin!("reward-network"))
        .arg(csv1.path())
        .arg("--catalog")
        .arg(common::catalog())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("1,123456789,Annabelle,4.00,4.00"));

    // 2. Second run against the same DB: the catalog must not reset savings
    let csv2 = NamedTempFile::new().unwrap();
    common::write_dinings(csv2.path(), &[("50.00", "1234567890123456", "1234567890")]).unwrap();

    let output2 = Command::new(cargo_bin!("reward-network"))
        .arg(csv2.path())
        .arg("--catalog")
        .arg(common::catalog())
        .arg("--db-path")
        .arg(&db_path)
        .output()
        .expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    // Confirmation numbers continue and savings build on the first run
    assert!(stdout2.contains("2,123456789,Annabelle,2.00,6.00"));
}
