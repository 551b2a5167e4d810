//! Backup and restore orchestration.
//!
//! Both directions are sequential batch jobs: each record is copied (and on
//! restore inserted) before the next one is looked at, and the first failure
//! ends the run. Nothing already copied or inserted is rolled back.
//!
//! # Backup Layout
//!
//! ```text
//! <backup root>/
//! ├── sql.txt                   # manifest, one record per line
//! └── <folder>/
//!     └── <name>                # copied signature content
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use sigsync::sync::{run_backup, run_restore};
//!
//! let report = run_backup(profile_root, backup_root)?;
//! println!("{} signatures saved", report.signatures);
//!
//! let report = run_restore(backup_root, other_profile_root)?;
//! println!("sequence now {:?}", report.sequence);
//! ```

mod backup;
mod layout;
mod report;
mod restore;
mod verify;

pub use backup::{run_backup, run_backup_with_progress};
pub use layout::{BackupLayout, ProfileLayout, SIGNATURES_DIR_NAME};
pub use report::{BackupReport, RestoreReport, VerifyReport};
pub use restore::{run_restore, run_restore_with_progress};
pub use verify::verify_backup;

use crate::catalog::SignatureRecord;

/// Receives progress callbacks while a run walks its records.
pub trait ProgressSink {
    /// Called once before the first record. Restore streams its manifest and
    /// does not know the total up front.
    fn on_start(&mut self, _total: Option<usize>) {}

    /// Called after a record has been fully processed.
    fn on_record(&mut self, _record: &SignatureRecord) {}

    /// Called once after the last record, on success only.
    fn on_finish(&mut self) {}
}

/// Progress sink that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}
