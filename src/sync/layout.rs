//! Path construction for the two on-disk layouts.

use std::path::{Path, PathBuf};

use crate::catalog::SignatureRecord;
use crate::manifest::MANIFEST_FILE_NAME;

/// Directory below a profile root holding signature folders.
pub const SIGNATURES_DIR_NAME: &str = "Signatures";

/// A live mail-client profile: `Outlook.sqlite` plus `Signatures/`.
#[derive(Debug, Clone)]
pub struct ProfileLayout {
    root: PathBuf,
}

impl ProfileLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn signatures_dir(&self) -> PathBuf {
        self.root.join(SIGNATURES_DIR_NAME)
    }

    pub fn folder_dir(&self, record: &SignatureRecord) -> PathBuf {
        self.signatures_dir().join(&record.folder)
    }

    pub fn signature_file(&self, record: &SignatureRecord) -> PathBuf {
        self.signatures_dir().join(record.relative_path())
    }
}

/// A backup snapshot: `sql.txt` plus one directory per folder.
#[derive(Debug, Clone)]
pub struct BackupLayout {
    root: PathBuf,
}

impl BackupLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE_NAME)
    }

    pub fn folder_dir(&self, record: &SignatureRecord) -> PathBuf {
        self.root.join(&record.folder)
    }

    pub fn signature_file(&self, record: &SignatureRecord) -> PathBuf {
        self.root.join(record.relative_path())
    }
}
