//! SQLite access to the Outlook `Signatures` table.
//!
//! The database belongs to the mail client. This module only ever reads
//! rows, inserts rows with caller-supplied identifiers, and nudges the
//! `sqlite_sequence` bookkeeping row afterwards. It never creates the
//! database or alters its schema.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ErrorCode, OpenFlags, OptionalExtension, params};
use tracing::{debug, info, instrument, trace, warn};

use super::schema::{RecordId, SignatureRecord};
use crate::error::{Result, SigError};

/// File name of the Outlook database inside a profile root.
pub const DATABASE_FILE_NAME: &str = "Outlook.sqlite";

const SELECT_SIGNATURES_SQL: &str = "SELECT Record_RecordID, PathToDataFile FROM Signatures";
const INSERT_SIGNATURE_SQL: &str =
    "INSERT INTO Signatures (Record_RecordID, PathToDataFile) VALUES (?1, ?2)";
const SELECT_RECORD_IDS_SQL: &str = "SELECT Record_RecordID FROM Signatures";
const SEQUENCE_TABLE_EXISTS_SQL: &str =
    "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'";
const UPDATE_SEQUENCE_SQL: &str = "UPDATE sqlite_sequence SET seq = ?1 WHERE name = 'Signatures'";
const SELECT_SEQUENCE_SQL: &str = "SELECT seq FROM sqlite_sequence WHERE name = 'Signatures'";

/// Connection to a profile's signature catalog.
///
/// The connection is closed when the value is dropped, so holding it for the
/// duration of one backup or restore scopes the database to that run.
pub struct SignatureCatalog {
    conn: Connection,
    path: PathBuf,
}

impl SignatureCatalog {
    /// Opens the catalog of `profile_root` for reading only.
    #[instrument(skip_all, fields(profile = %profile_root.as_ref().display()))]
    pub fn open_read_only<P: AsRef<Path>>(profile_root: P) -> Result<Self> {
        Self::open_with(profile_root.as_ref(), OpenFlags::SQLITE_OPEN_READ_ONLY)
    }

    /// Opens the catalog of `profile_root` for reading and writing.
    #[instrument(skip_all, fields(profile = %profile_root.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(profile_root: P) -> Result<Self> {
        Self::open_with(profile_root.as_ref(), OpenFlags::SQLITE_OPEN_READ_WRITE)
    }

    fn open_with(profile_root: &Path, access: OpenFlags) -> Result<Self> {
        let path = database_path(profile_root);
        if !path.is_file() {
            return Err(SigError::ProfileNotFound {
                path: path.display().to_string(),
            });
        }

        debug!(path = %path.display(), "Opening signature catalog");
        // Without SQLITE_OPEN_CREATE a vanished file fails instead of being recreated.
        let flags = access | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&path, flags)
            .map_err(|e| unavailable(&path, &e))?;

        Ok(Self { conn, path })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists every signature row in storage order.
    #[instrument(skip(self))]
    pub fn list_signatures(&self) -> Result<Vec<SignatureRecord>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_SIGNATURES_SQL)
            .map_err(|e| unavailable(&self.path, &e))?;

        let rows: Vec<(String, String)> = stmt
            .query_map([], |row| {
                let id = column_text(row.get_ref(0)?);
                let path = column_text(row.get_ref(1)?);
                Ok((id, path))
            })
            .map_err(|e| unavailable(&self.path, &e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| unavailable(&self.path, &e))?;

        let mut records = Vec::with_capacity(rows.len());
        for (id, path) in rows {
            let (record, truncated) = SignatureRecord::from_row(&id, &path).map_err(|_| {
                SigError::InvalidSignaturePath {
                    record_id: id.clone(),
                    path: path.clone(),
                }
            })?;
            if truncated {
                warn!(record_id = %id, path = %path, "Stored path has extra segments, keeping first three");
            }
            trace!(record_id = %record.record_id, folder = %record.folder, name = %record.name, "Found signature");
            records.push(record);
        }

        debug!(count = records.len(), "Listed signatures");
        Ok(records)
    }

    /// Inserts a row with an explicit identifier.
    ///
    /// The identifier is bound as given; the database never assigns one.
    /// Duplicates are reported, not deduplicated.
    #[instrument(skip(self, record_id), fields(record_id = %record_id))]
    pub fn insert_signature(&self, record_id: &RecordId, stored_path: &str) -> Result<()> {
        self.conn
            .execute(INSERT_SIGNATURE_SQL, params![record_id.as_str(), stored_path])
            .map_err(|e| match e.sqlite_error_code() {
                Some(ErrorCode::ConstraintViolation | ErrorCode::TypeMismatch) => {
                    SigError::ConstraintViolation {
                        record_id: record_id.to_string(),
                        reason: e.to_string(),
                    }
                }
                _ => unavailable(&self.path, &e),
            })?;

        debug!(stored_path, "Inserted signature row");
        Ok(())
    }

    /// Writes the highest `Record_RecordID` into the `sqlite_sequence` row of
    /// `Signatures`.
    ///
    /// Run once after a batch of explicit-id inserts. Returns the value
    /// written, or `None` when there was nothing to update (empty table, no
    /// sequence table, or no `Signatures` row in it).
    #[instrument(skip(self))]
    pub fn repair_auto_increment(&self) -> Result<Option<i64>> {
        let Some(max) = self.max_record_id()? else {
            debug!("No numeric record ids, nothing to repair");
            return Ok(None);
        };

        if !self.has_sequence_table()? {
            debug!("No sqlite_sequence table, nothing to repair");
            return Ok(None);
        }

        let updated = self
            .conn
            .execute(UPDATE_SEQUENCE_SQL, params![max])
            .map_err(|e| unavailable(&self.path, &e))?;

        if updated == 0 {
            debug!("No sequence row for Signatures");
            return Ok(None);
        }

        info!(seq = max, "Auto-increment counter repaired");
        Ok(Some(max))
    }

    /// Numerically largest `Record_RecordID`.
    ///
    /// Text ids are parsed, since a text column orders "9" after "10". Ids
    /// that are not integers are skipped with a warning.
    fn max_record_id(&self) -> Result<Option<i64>> {
        let mut stmt = self
            .conn
            .prepare(SELECT_RECORD_IDS_SQL)
            .map_err(|e| unavailable(&self.path, &e))?;
        let mut rows = stmt.query([]).map_err(|e| unavailable(&self.path, &e))?;

        let mut max = None;
        while let Some(row) = rows.next().map_err(|e| unavailable(&self.path, &e))? {
            let value = row.get_ref(0).map_err(|e| unavailable(&self.path, &e))?;
            let id = match value {
                ValueRef::Null => continue,
                ValueRef::Integer(i) => Some(i),
                ValueRef::Text(t) => std::str::from_utf8(t)
                    .ok()
                    .and_then(|text| text.trim().parse::<i64>().ok()),
                ValueRef::Real(_) | ValueRef::Blob(_) => None,
            };
            match id {
                Some(id) => max = max.max(Some(id)),
                None => warn!(record_id = %column_text(value), "Non-integer record id, ignored by sequence repair"),
            }
        }
        Ok(max)
    }

    fn has_sequence_table(&self) -> Result<bool> {
        self.conn
            .query_row(SEQUENCE_TABLE_EXISTS_SQL, [], |_| Ok(()))
            .optional()
            .map(|row| row.is_some())
            .map_err(|e| unavailable(&self.path, &e))
    }

    /// Current `sqlite_sequence` value for `Signatures`, if any.
    pub fn sequence_value(&self) -> Result<Option<i64>> {
        if !self.has_sequence_table()? {
            return Ok(None);
        }

        self.conn
            .query_row(SELECT_SEQUENCE_SQL, [], |row| row.get(0))
            .optional()
            .map_err(|e| unavailable(&self.path, &e))
    }
}

/// Returns `<profile_root>/Outlook.sqlite`.
pub fn database_path(profile_root: &Path) -> PathBuf {
    profile_root.join(DATABASE_FILE_NAME)
}

/// Opens a profile read-only and lists its signatures.
pub fn list_signatures<P: AsRef<Path>>(profile_root: P) -> Result<Vec<SignatureRecord>> {
    SignatureCatalog::open_read_only(profile_root)?.list_signatures()
}

fn column_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    }
}

fn unavailable(path: &Path, e: &rusqlite::Error) -> SigError {
    SigError::DatabaseUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}
