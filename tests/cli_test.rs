use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("tests/fixtures/dinings.csv")
        .arg("--catalog")
        .arg("tests/fixtures/catalog.json");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "confirmation,account,beneficiary,amount,total",
        ))
        // 8% of 100.00 split 50/50
        .stdout(predicate::str::contains("1,123456789,Annabelle,4.00,4.00"))
        .stdout(predicate::str::contains("1,123456789,Corgan,4.00,4.00"))
        // 8% of 12.34 is 0.99, split 25/75 with the leftover cent to Jane
        .stdout(predicate::str::contains("2,123456001,Jane,0.25,0.25"))
        .stdout(predicate::str::contains("2,123456001,Amy,0.74,0.74"));

    Ok(())
}

#[test]
fn test_cli_requires_catalog() {
    let mut cmd = Command::new(cargo_bin!("reward-network"));
    cmd.arg("tests/fixtures/dinings.csv");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--catalog"));
}
