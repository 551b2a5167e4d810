//! Restore is fail-fast: the first error ends the run and nothing is rolled back.

use std::fs;

use sigsync::error::SigError;
use sigsync::sync::{run_backup, run_restore};

use crate::common::fixtures::{LOOSE_SIGNATURES_SCHEMA, TestBackup, TestProfile, sig};
use crate::common::init_test_logging;

#[test]
fn test_missing_manifest() {
    init_test_logging();
    let backup = TestBackup::new();
    fs::create_dir(backup.root()).unwrap();
    let target = TestProfile::empty();

    let err = run_restore(&backup.root(), target.path()).unwrap_err();
    assert!(matches!(err, SigError::BackupNotFound { .. }), "got {err:?}");
}

#[test]
fn test_manifest_checked_before_profile() {
    init_test_logging();
    let backup = TestBackup::new();
    let nowhere = TestBackup::new();

    let err = run_restore(&backup.root(), nowhere.dir.path()).unwrap_err();
    assert!(matches!(err, SigError::BackupNotFound { .. }), "got {err:?}");
}

#[test]
fn test_missing_profile_database() {
    init_test_logging();
    let backup = TestBackup::with_manifest("1/Signatures/A/a\n", &[("A", "a", b"x")]);
    let nowhere = TestBackup::new();

    let err = run_restore(&backup.root(), nowhere.dir.path()).unwrap_err();
    assert!(matches!(err, SigError::ProfileNotFound { .. }), "got {err:?}");
    assert!(!nowhere.dir.path().join("Signatures").exists());
}

#[test]
fn test_malformed_line_keeps_earlier_records() {
    init_test_logging();
    let backup = TestBackup::with_manifest(
        "1/Signatures/A/first\n42/onlyonefield\n2/Signatures/A/second\n",
        &[("A", "first", b"1"), ("A", "second", b"2")],
    );
    let target = TestProfile::empty();

    let err = run_restore(&backup.root(), target.path()).unwrap_err();
    match err {
        SigError::MalformedManifest { line, content, .. } => {
            assert_eq!(line, 2);
            assert_eq!(content, "42/onlyonefield");
        }
        other => panic!("Expected MalformedManifest, got {other:?}"),
    }

    assert_eq!(target.rows(), vec![(1, "Signatures/A/first".to_string())]);
    assert!(target.signature_file("A", "first").exists());
    assert!(!target.signature_file("A", "second").exists());
}

#[test]
fn test_missing_backup_file_aborts_before_insert() {
    init_test_logging();
    let backup = TestBackup::with_manifest(
        "1/Signatures/A/present\n2/Signatures/B/absent\n",
        &[("A", "present", b"here")],
    );
    let target = TestProfile::empty();

    let err = run_restore(&backup.root(), target.path()).unwrap_err();
    assert!(matches!(err, SigError::NotFound { .. }), "got {err:?}");
    assert_eq!(target.rows(), vec![(1, "Signatures/A/present".to_string())]);
}

#[test]
fn test_second_restore_hits_identifier_constraint() {
    init_test_logging();
    let source = TestProfile::with_signatures(&[sig(4, "A", "x", b"x")]);
    let backup = TestBackup::new();
    let target = TestProfile::empty();
    run_backup(source.path(), &backup.root()).unwrap();

    run_restore(&backup.root(), target.path()).unwrap();
    let err = run_restore(&backup.root(), target.path()).unwrap_err();

    assert!(matches!(err, SigError::ConstraintViolation { .. }), "got {err:?}");
    assert_eq!(target.rows().len(), 1);
}

#[test]
fn test_second_restore_duplicates_without_constraint() {
    init_test_logging();
    let source = TestProfile::with_signatures(&[sig(4, "A", "x", b"x"), sig(5, "B", "y", b"y")]);
    let backup = TestBackup::new();
    let target = TestProfile::with_schema(LOOSE_SIGNATURES_SCHEMA);
    run_backup(source.path(), &backup.root()).unwrap();

    run_restore(&backup.root(), target.path()).unwrap();
    run_restore(&backup.root(), target.path()).unwrap();

    assert_eq!(target.rows().len(), 4);
}

#[test]
fn test_restore_creates_signatures_dir() {
    init_test_logging();
    let backup = TestBackup::with_manifest("1/Signatures/A/a\n", &[("A", "a", b"x")]);
    let target = TestProfile::empty();
    fs::remove_dir(target.path().join("Signatures")).unwrap();

    run_restore(&backup.root(), target.path()).unwrap();
    assert_eq!(fs::read(target.signature_file("A", "a")).unwrap(), b"x");
}

#[test]
fn test_restore_overwrites_existing_file() {
    init_test_logging();
    let backup = TestBackup::with_manifest("1/Signatures/A/a\n", &[("A", "a", b"from backup")]);
    let target = TestProfile::empty();
    fs::create_dir(target.path().join("Signatures").join("A")).unwrap();
    fs::write(target.signature_file("A", "a"), b"local edit").unwrap();

    run_restore(&backup.root(), target.path()).unwrap();
    assert_eq!(fs::read(target.signature_file("A", "a")).unwrap(), b"from backup");
}
