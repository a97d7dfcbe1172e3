use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RECEIPT: &str = "UPI Reference\nUTR No 123456789\nPaid Rs.500 on 12/01/2024";
const STATEMENT: &str =
    "Opening Balance 5000\nClosing Balance 20000\n01/02/2024 NEFT credit 15000\n03/02/2024 UPI debit 9000";

fn txproof(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("txproof").unwrap();
    cmd.arg("-c").arg(config_dir.path().join("config.json"));
    cmd
}

fn with_config() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let config = txproof_core::TxProofConfig::default();
    config.save(&dir.path().join("config.json")).unwrap();
    dir
}

#[test]
fn verify_text_prints_envelope() {
    let dir = with_config();
    txproof(&dir)
        .args(["verify-text", RECEIPT])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":true"))
        .stdout(predicate::str::contains("\"document_type\":\"UPI_RECEIPT\""))
        .stdout(predicate::str::contains("\"final_status\":\"Valid\""));
}

#[test]
fn verify_text_reads_stdin() {
    let dir = with_config();
    txproof(&dir)
        .args(["verify-text", "-"])
        .write_stdin(STATEMENT)
        .assert()
        .success()
        .stdout(predicate::str::contains("BANK_STATEMENT"))
        .stdout(predicate::str::contains("\"final_status\":\"Invalid\""))
        .stdout(predicate::str::contains("confidence_score").not());
}

#[test]
fn verify_text_cap_override() {
    let dir = with_config();
    txproof(&dir)
        .args(["verify-text", "--cap", "5000", STATEMENT])
        .assert()
        .success()
        .stdout(predicate::str::contains("no_transaction_upto_5000"));
}

#[test]
fn process_text_file_as_text_summary() {
    let dir = with_config();
    let input = dir.path().join("receipt.txt");
    fs::write(&input, RECEIPT).unwrap();

    txproof(&dir)
        .arg("process")
        .arg(&input)
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document type: UPI_RECEIPT"))
        .stdout(predicate::str::contains("Status: Valid"))
        .stdout(predicate::str::contains("Transaction ID: 123456789"));
}

#[test]
fn process_writes_csv_output() {
    let dir = with_config();
    let input = dir.path().join("receipt.txt");
    let output = dir.path().join("report.csv");
    fs::write(&input, RECEIPT).unwrap();

    txproof(&dir)
        .arg("process")
        .arg(&input)
        .args(["--format", "csv", "--output"])
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("file,document_type,amount"));
    assert!(csv.contains("UPI_RECEIPT"));
    assert!(csv.contains("1.00"));
}

#[test]
fn process_rejects_unsupported_format() {
    let dir = with_config();
    let input = dir.path().join("receipt.docx");
    fs::write(&input, RECEIPT).unwrap();

    txproof(&dir)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Document processing failed"))
        .stderr(predicate::str::contains("unsupported file format"));
}

#[test]
fn process_rejects_blank_text() {
    let dir = with_config();
    let input = dir.path().join("blank.txt");
    fs::write(&input, "   \n").unwrap();

    txproof(&dir)
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text could be extracted"));
}

#[test]
fn process_missing_file_fails() {
    let dir = with_config();
    txproof(&dir)
        .arg("process")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_reports_and_summary() {
    let dir = with_config();
    let inputs = dir.path().join("inputs");
    let out = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("receipt.txt"), RECEIPT).unwrap();
    fs::write(inputs.join("statement.txt"), STATEMENT).unwrap();
    fs::write(inputs.join("blank.txt"), "").unwrap();
    fs::write(inputs.join("notes.docx"), "ignored").unwrap();

    txproof(&dir)
        .arg("batch")
        .arg(format!("{}/*", inputs.display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--continue-on-error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"));

    assert!(out.join("receipt.json").exists());
    assert!(out.join("statement.json").exists());
    assert!(!out.join("blank.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.lines().next().unwrap().contains("processed_at"));
    assert!(summary.contains("receipt.txt,success,UPI_RECEIPT,Valid"));
    assert!(summary.contains("blank.txt,error"));
}

#[test]
fn batch_stops_on_first_error_by_default() {
    let dir = with_config();
    let inputs = dir.path().join("inputs");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("blank.txt"), "").unwrap();

    txproof(&dir)
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn config_set_changes_cap() {
    let dir = with_config();

    txproof(&dir)
        .args(["config", "set", "verification.subsidy_max_amount", "5000"])
        .assert()
        .success();

    txproof(&dir)
        .args(["config", "get", "verification.subsidy_max_amount"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5000"));

    txproof(&dir)
        .args(["verify-text", STATEMENT])
        .assert()
        .success()
        .stdout(predicate::str::contains("no_transaction_upto_5000"));
}

#[test]
fn config_rejects_unknown_key() {
    let dir = with_config();
    txproof(&dir)
        .args(["config", "set", "verification.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
