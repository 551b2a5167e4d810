//! Human-mode end-to-end tests.

use crate::common::cli::CliRunner;
use crate::common::fixtures::{TestBackup, TestProfile, sig};
use crate::common::init_test_logging;

#[test]
fn human_backup_summary() {
    init_test_logging();
    let source = TestProfile::with_signatures(&[sig(1, "A", "a.html", b"a")]);
    let backup = TestBackup::new();
    let cli = CliRunner::new();

    let result = cli.run(&[
        "backup",
        "--src",
        &source.path().display().to_string(),
        "--dst",
        &backup.root().display().to_string(),
    ]);
    result
        .assert_success()
        .assert_stdout_matches(r"Backed up 1 signature\(s\) in 1 folder\(s\)")
        .assert_stdout_contains("sql.txt");
    assert!(
        serde_json::from_str::<serde_json::Value>(result.stdout.trim()).is_err(),
        "Human mode output should not be JSON"
    );
}

#[test]
fn human_quiet_prints_nothing() {
    init_test_logging();
    let source = TestProfile::with_signatures(&[sig(1, "A", "a.html", b"a")]);
    let backup = TestBackup::new();

    let result = CliRunner::new().run(&[
        "--quiet",
        "backup",
        "--src",
        &source.path().display().to_string(),
        "--dst",
        &backup.root().display().to_string(),
    ]);
    result.assert_success();
    assert!(result.stdout.is_empty(), "unexpected stdout: {}", result.stdout);
}

#[test]
fn human_list_rows() {
    init_test_logging();
    let source = TestProfile::with_signatures(&[sig(42, "Folder", "Sig.rtf", b"x")]);

    CliRunner::new()
        .run(&["list", "--src", &source.path().display().to_string()])
        .assert_success()
        .assert_stdout_matches(r"42\s+Signatures/Folder/Sig\.rtf");
}

#[test]
fn human_error_has_hint() {
    init_test_logging();
    let backup = TestBackup::new();
    std::fs::create_dir(backup.root()).unwrap();

    let result = CliRunner::new().run(&["verify", "--src", &backup.root().display().to_string()]);
    result
        .assert_exit_code(3)
        .assert_stderr_contains("Error")
        .assert_stderr_contains("Hint");
}

#[test]
fn human_version_lines() {
    init_test_logging();
    CliRunner::new()
        .run(&["version"])
        .assert_success()
        .assert_stdout_matches(r"^sigsync \d+\.\d+\.\d+")
        .assert_stdout_contains("rustc:");
}
