//! Profile → backup snapshot.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::layout::{BackupLayout, ProfileLayout};
use super::report::{BackupReport, Tally};
use super::{NoProgress, ProgressSink};
use crate::catalog::SignatureCatalog;
use crate::error::Result;
use crate::manifest::write_manifest;
use crate::transfer::{copy_file, ensure_directory};

/// Copies every signature of `profile_root` into `backup_root` and writes
/// the manifest.
pub fn run_backup(profile_root: &Path, backup_root: &Path) -> Result<BackupReport> {
    run_backup_with_progress(profile_root, backup_root, &mut NoProgress)
}

/// [`run_backup`] with progress callbacks.
///
/// The database is checked before anything is written, so a missing profile
/// leaves the filesystem untouched. Files left over from an earlier backup
/// with more signatures are not removed.
#[instrument(skip_all, fields(profile = %profile_root.display(), backup = %backup_root.display()))]
pub fn run_backup_with_progress(
    profile_root: &Path,
    backup_root: &Path,
    progress: &mut dyn ProgressSink,
) -> Result<BackupReport> {
    let started_at = Utc::now();
    let profile = ProfileLayout::new(profile_root);
    let backup = BackupLayout::new(backup_root);

    let (database_path, records) = {
        let catalog = SignatureCatalog::open_read_only(profile.root())?;
        (catalog.path().to_path_buf(), catalog.list_signatures()?)
    };
    info!(count = records.len(), "Backing up signatures");
    progress.on_start(Some(records.len()));

    ensure_directory(backup.root())?;

    let mut tally = Tally::default();
    for record in &records {
        debug!(record_id = %record.record_id, folder = %record.folder, name = %record.name, "Backing up signature");
        ensure_directory(&backup.folder_dir(record))?;
        let bytes = copy_file(&profile.signature_file(record), &backup.signature_file(record))?;
        tally.record(record, bytes);
        progress.on_record(record);
    }

    let manifest_path = backup.manifest_path();
    write_manifest(&manifest_path, &records)?;
    progress.on_finish();

    info!(
        signatures = tally.signatures,
        folders = tally.folders(),
        bytes = tally.bytes_copied,
        "Backup complete"
    );
    Ok(BackupReport {
        profile_root: profile.root().to_path_buf(),
        database_path,
        backup_root: backup.root().to_path_buf(),
        manifest_path,
        signatures: tally.signatures,
        folders: tally.folders(),
        bytes_copied: tally.bytes_copied,
        started_at,
        finished_at: Utc::now(),
    })
}
