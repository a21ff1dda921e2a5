//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE: &str = "../../records/sample.toml";

fn markbuddy() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("markbuddy").unwrap();
    cmd.env_remove("MARKBUDDY_RECORD");
    cmd
}

#[test]
fn calc_text_output() {
    markbuddy()
        .arg("calc")
        .arg("--record")
        .arg(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Semester: Fall 2024 (CGPA 3.70"))
        .stdout(predicate::str::contains("Semester: Spring 2025 (CGPA 1.80"))
        .stdout(predicate::str::contains("Data Structures"))
        .stdout(predicate::str::contains("3.30"))
        .stdout(predicate::str::contains("Overall CGPA: 2.75"));
}

#[test]
fn calc_json_output() {
    let output = markbuddy()
        .arg("calc")
        .arg("--record")
        .arg(SAMPLE)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let overall = json["overall_cgpa"].as_f64().unwrap();
    assert!((overall - 2.75).abs() < 1e-9);
    assert_eq!(json["semesters"].as_array().unwrap().len(), 2);
    assert_eq!(json["semesters"][0]["courses"][1]["gpa"], 4.0);
}

#[test]
fn calc_markdown_output() {
    markbuddy()
        .arg("calc")
        .arg("--record")
        .arg(SAMPLE)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("**Overall CGPA:** 2.75"))
        .stdout(predicate::str::contains("| Linear Algebra | 3 | no | - | 3.00 |"));
}

#[test]
fn calc_saves_transcript() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transcript.json");

    markbuddy()
        .arg("calc")
        .arg("--record")
        .arg(SAMPLE)
        .arg("--output")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Transcript saved to"));

    let transcript = markbuddy_core::report::Transcript::load_json(&path).unwrap();
    assert_eq!(transcript.semesters.len(), 2);
}

#[test]
fn calc_reads_json_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("book.json");
    let book = markbuddy_core::parser::parse_record(std::path::Path::new(SAMPLE)).unwrap();
    book.save_json(&snapshot).unwrap();

    markbuddy()
        .arg("calc")
        .arg("--record")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Overall CGPA: 2.75"));
}

#[test]
fn calc_uses_default_record_from_config() {
    let dir = TempDir::new().unwrap();
    let sample = std::fs::canonicalize(SAMPLE).unwrap();
    let config = dir.path().join("markbuddy.toml");
    std::fs::write(
        &config,
        format!(
            "default_record = {}\nprecision = 1\n",
            toml::Value::String(sample.display().to_string())
        ),
    )
    .unwrap();

    markbuddy()
        .arg("calc")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Semester: Fall 2024 (CGPA 3.7,"));
}

#[test]
fn calc_without_record_fails() {
    let dir = TempDir::new().unwrap();

    markbuddy()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("calc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no record given"));
}

#[test]
fn calc_unknown_format_fails() {
    markbuddy()
        .arg("calc")
        .arg("--record")
        .arg(SAMPLE)
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn calc_nonexistent_record() {
    markbuddy()
        .arg("calc")
        .arg("--record")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_sample_record() {
    markbuddy()
        .arg("validate")
        .arg("--record")
        .arg(SAMPLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 semester(s), 4 course(s)"))
        .stdout(predicate::str::contains("All records valid"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        r#"
[[semesters]]
name = "Fall"

[[semesters.courses]]
name = "Physics"
credit_hours = 3
quizzes = [{ obtained = 11, total = 10 }]
"#,
    )
    .unwrap();

    markbuddy()
        .arg("validate")
        .arg("--record")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[Fall / Physics] WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found"));
}

#[test]
fn validate_directory() {
    markbuddy()
        .arg("validate")
        .arg("--record")
        .arg("../../records")
        .assert()
        .success()
        .stdout(predicate::str::contains("sample.toml"));
}

#[test]
fn validate_nonexistent_file() {
    markbuddy()
        .arg("validate")
        .arg("--record")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn scale_lists_every_band() {
    markbuddy()
        .arg("scale")
        .assert()
        .success()
        .stdout(predicate::str::contains("85+"))
        .stdout(predicate::str::contains("4.00"))
        .stdout(predicate::str::contains("1.70"))
        .stdout(predicate::str::contains("<50"));
}

#[test]
fn grade_at_boundaries() {
    markbuddy()
        .arg("grade")
        .arg("--percent")
        .arg("85")
        .assert()
        .success()
        .stdout(predicate::str::contains("GPA 4.00"));

    markbuddy()
        .arg("grade")
        .arg("--percent")
        .arg("84.99")
        .assert()
        .success()
        .stdout(predicate::str::contains("GPA 3.70"));

    markbuddy()
        .arg("grade")
        .arg("--percent")
        .arg("-5")
        .assert()
        .success()
        .stdout(predicate::str::contains("GPA 0.00"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    markbuddy()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created markbuddy.toml"))
        .stdout(predicate::str::contains("Created records/example.toml"));

    assert!(dir.path().join("markbuddy.toml").exists());
    assert!(dir.path().join("records/example.toml").exists());

    // The starter files work together.
    markbuddy()
        .current_dir(dir.path())
        .arg("calc")
        .assert()
        .success()
        .stdout(predicate::str::contains("Programming Fundamentals"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    markbuddy()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    // Second init should skip
    markbuddy()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    markbuddy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal GPA and CGPA record keeper"));
}

#[test]
fn version_output() {
    markbuddy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("markbuddy"));
}
