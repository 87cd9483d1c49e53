use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

const CSV_A: &str = "EbN0,BER\n0,0.5\n5,0.01\n";
const CSV_B: &str = "EbN0,BER\n0,0.3\n5,0.002\n10,1e-5\n";

fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn even_argument_count_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("ber_plot").unwrap();
    cmd.args(["a.csv", "A", "b.csv", "out.png"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Incorrect number of arguments"));
}

#[test]
fn missing_output_argument_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("ber_plot").unwrap();
    cmd.args(["a.csv", "A"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Incorrect number of arguments"));
}

#[test]
fn usage_check_runs_before_any_file_io() {
    // both paths are bogus, the parity check must fire first
    let mut cmd = Command::cargo_bin("ber_plot").unwrap();
    cmd.args(["no_such.csv", "A"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Incorrect number of arguments"))
        .stderr(predicate::str::contains("could not read").not());
}

#[test]
fn single_curve_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.csv", CSV_A);
    let out = dir.path().join("out.png");
    let mut cmd = Command::cargo_bin("ber_plot").unwrap();
    cmd.args([a.to_str().unwrap(), "A", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{} with label A",
            a.display()
        )))
        .stdout(predicate::str::contains(format!(
            "Plot saved in {}",
            out.display()
        )));
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn two_curves_report_pairs_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.csv", CSV_A);
    let b = write_file(&dir, "b.csv", CSV_B);
    let out = dir.path().join("overlay.png");
    let mut cmd = Command::cargo_bin("ber_plot").unwrap();
    let assert = cmd
        .args([
            a.to_str().unwrap(),
            "convolutional",
            b.to_str().unwrap(),
            "turbo",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let first = stdout
        .find(&format!("{} with label convolutional", a.display()))
        .unwrap();
    let second = stdout
        .find(&format!("{} with label turbo", b.display()))
        .unwrap();
    assert!(first < second);
    assert!(stdout.contains(&format!("Plot saved in {}", out.display())));
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn missing_ber_column_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_file(&dir, "a.csv", "EbN0,PER\n0,0.5\n5,0.01\n");
    let out = dir.path().join("out.png");
    let mut cmd = Command::cargo_bin("ber_plot").unwrap();
    cmd.args([a.to_str().unwrap(), "A", out.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("has no BER column"));
    assert!(!out.exists());
}

#[test]
fn missing_input_file_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("no_such.csv");
    let out = dir.path().join("out.png");
    let mut cmd = Command::cargo_bin("ber_plot").unwrap();
    cmd.args([a.to_str().unwrap(), "A", out.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("could not read"));
    assert!(!out.exists());
}
