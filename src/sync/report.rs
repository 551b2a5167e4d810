//! Summaries returned by the orchestrators.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::SignatureRecord;

/// Outcome of a successful backup run.
#[derive(Debug, Clone, Serialize)]
pub struct BackupReport {
    pub profile_root: PathBuf,
    /// Catalog the rows were read from.
    pub database_path: PathBuf,
    pub backup_root: PathBuf,
    pub manifest_path: PathBuf,
    pub signatures: usize,
    pub folders: usize,
    pub bytes_copied: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Outcome of a successful restore run.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreReport {
    pub backup_root: PathBuf,
    pub profile_root: PathBuf,
    /// Catalog the rows were inserted into.
    pub database_path: PathBuf,
    pub signatures: usize,
    pub folders: usize,
    pub bytes_copied: u64,
    /// Value written to `sqlite_sequence`, if the repair touched it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<i64>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Outcome of checking a backup without touching any profile.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub backup_root: PathBuf,
    pub entries: usize,
    /// Manifest entries whose file is absent, as `<folder>/<name>`.
    pub missing: Vec<String>,
    pub ok: bool,
}

/// Running totals shared by backup and restore.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub signatures: usize,
    pub bytes_copied: u64,
    folders: BTreeSet<String>,
}

impl Tally {
    pub fn record(&mut self, record: &SignatureRecord, bytes: u64) {
        self.signatures += 1;
        self.bytes_copied += bytes;
        self.folders.insert(record.folder.clone());
    }

    pub fn folders(&self) -> usize {
        self.folders.len()
    }
}
