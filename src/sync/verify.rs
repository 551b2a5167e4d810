//! Read-only consistency check of a backup snapshot.

use std::path::Path;

use tracing::{info, instrument, warn};

use super::layout::BackupLayout;
use super::report::VerifyReport;
use crate::error::Result;
use crate::manifest::read_manifest;

/// Decodes the whole manifest and reports entries without a backing file.
///
/// Fails on a missing manifest or the first malformed line. Missing files
/// are reported, not raised.
#[instrument(skip_all, fields(backup = %backup_root.display()))]
pub fn verify_backup(backup_root: &Path) -> Result<VerifyReport> {
    let backup = BackupLayout::new(backup_root);

    let mut entries = 0;
    let mut missing = Vec::new();
    for record in read_manifest(&backup.manifest_path())? {
        let record = record?;
        entries += 1;
        if !backup.signature_file(&record).is_file() {
            warn!(record_id = %record.record_id, folder = %record.folder, name = %record.name, "Signature file missing from backup");
            missing.push(record.relative_path().display().to_string());
        }
    }

    info!(entries, missing = missing.len(), "Backup verified");
    Ok(VerifyReport {
        backup_root: backup.root().to_path_buf(),
        entries,
        ok: missing.is_empty(),
        missing,
    })
}
