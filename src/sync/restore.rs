//! Backup snapshot → profile.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info, instrument};

use super::layout::{BackupLayout, ProfileLayout};
use super::report::{RestoreReport, Tally};
use super::{NoProgress, ProgressSink};
use crate::catalog::SignatureCatalog;
use crate::error::{Result, SigError};
use crate::manifest::read_manifest;
use crate::transfer::{copy_file, ensure_directory};

/// Replays the manifest in `backup_root` into `profile_root`.
pub fn run_restore(backup_root: &Path, profile_root: &Path) -> Result<RestoreReport> {
    run_restore_with_progress(backup_root, profile_root, &mut NoProgress)
}

/// [`run_restore`] with progress callbacks.
///
/// Rows are inserted with the identifiers recorded in the manifest. Existing
/// rows are never touched, so restoring twice duplicates (or collides with)
/// the first run's rows. Records processed before a failure stay in place.
#[instrument(skip_all, fields(backup = %backup_root.display(), profile = %profile_root.display()))]
pub fn run_restore_with_progress(
    backup_root: &Path,
    profile_root: &Path,
    progress: &mut dyn ProgressSink,
) -> Result<RestoreReport> {
    let started_at = Utc::now();
    let backup = BackupLayout::new(backup_root);
    let profile = ProfileLayout::new(profile_root);

    let manifest_path = backup.manifest_path();
    if !manifest_path.is_file() {
        return Err(SigError::BackupNotFound {
            path: manifest_path.display().to_string(),
        });
    }

    let catalog = SignatureCatalog::open(profile.root())?;
    let mut manifest = read_manifest(&manifest_path)?;
    progress.on_start(None);

    ensure_directory(&profile.signatures_dir())?;

    let mut tally = Tally::default();
    for record in manifest.by_ref() {
        let record = record?;
        debug!(record_id = %record.record_id, folder = %record.folder, name = %record.name, "Restoring signature");

        ensure_directory(&profile.folder_dir(&record))?;
        let bytes = copy_file(&backup.signature_file(&record), &profile.signature_file(&record))?;
        catalog.insert_signature(&record.record_id, &record.stored_path())?;

        tally.record(&record, bytes);
        progress.on_record(&record);
    }

    // One repair after the whole batch; the sequence table has a single row per table.
    let sequence = if tally.signatures > 0 {
        catalog.repair_auto_increment()?
    } else {
        debug!("Manifest was empty, leaving sequence untouched");
        None
    };
    progress.on_finish();

    info!(
        signatures = tally.signatures,
        manifest_lines = manifest.line_number(),
        folders = tally.folders(),
        bytes = tally.bytes_copied,
        sequence = ?sequence,
        "Restore complete"
    );
    Ok(RestoreReport {
        backup_root: backup.root().to_path_buf(),
        profile_root: profile.root().to_path_buf(),
        database_path: catalog.path().to_path_buf(),
        signatures: tally.signatures,
        folders: tally.folders(),
        bytes_copied: tally.bytes_copied,
        sequence,
        started_at,
        finished_at: Utc::now(),
    })
}
