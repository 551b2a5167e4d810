//! Signature record types shared by the catalog and the manifest codec.
//!
//! A record travels as a single `/`-joined line:
//!
//! ```text
//! <record id>/<prefix>/<folder>/<name>
//! 42/Signatures/3F2504E0/Work.html
//! ```
//!
//! The prefix is whatever the database stored in front of the folder
//! (normally `Signatures`); it is carried through untouched.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Separator between manifest fields and stored path segments.
pub const FIELD_SEPARATOR: char = '/';

/// Primary key of a row in the `Signatures` table, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps an identifier. Must be non-empty and free of `/`.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() || id.contains(FIELD_SEPARATOR) {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One signature: a database row plus the file it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub record_id: RecordId,
    /// Opaque stored path prefix (second manifest field).
    pub prefix: String,
    /// Directory grouping the signature file.
    pub folder: String,
    /// File name of the signature.
    pub name: String,
}

impl SignatureRecord {
    /// Parses `<id>/<prefix>/<folder>/<name>`.
    ///
    /// Fields past the fourth are ignored; the returned flag reports whether
    /// any were dropped so callers can log it.
    pub fn parse_line(line: &str) -> Result<(Self, bool), &'static str> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < 4 {
            return Err("expected at least 4 '/'-separated fields");
        }

        let record_id = RecordId::new(fields[0]).ok_or("empty record id")?;
        let folder = checked_segment(fields[2]).ok_or("invalid folder name")?;
        let name = checked_segment(fields[3]).ok_or("invalid signature name")?;

        let record = Self {
            record_id,
            prefix: fields[1].to_string(),
            folder: folder.to_string(),
            name: name.to_string(),
        };
        Ok((record, fields.len() > 4))
    }

    /// Builds a record from a `Signatures` row.
    ///
    /// The row's id and `PathToDataFile` are joined exactly as they appear in
    /// the manifest, then parsed back, so both paths share one grammar.
    pub fn from_row(record_id: &str, path_to_data_file: &str) -> Result<(Self, bool), &'static str> {
        Self::parse_line(&format!("{record_id}{FIELD_SEPARATOR}{path_to_data_file}"))
    }

    /// Value for the `PathToDataFile` column.
    pub fn stored_path(&self) -> String {
        format!("{}/{}/{}", self.prefix, self.folder, self.name)
    }

    /// Path below a signatures root: `<folder>/<name>`.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.folder).join(&self.name)
    }

    /// Serialized manifest form, without line terminator.
    pub fn manifest_line(&self) -> String {
        format!("{}/{}", self.record_id, self.stored_path())
    }
}

fn checked_segment(segment: &str) -> Option<&str> {
    match segment {
        "" | "." | ".." => None,
        s if s.contains('\\') => None,
        s => Some(s),
    }
}
