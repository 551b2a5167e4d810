//! Error types for signature backup and restore.

use std::path::Path;

use thiserror::Error;

/// Primary error type for signature sync operations.
///
/// Every variant is terminal for the current run; nothing in the library
/// retries or recovers locally.
#[derive(Error, Debug)]
pub enum SigError {
    // Layout errors
    #[error("Outlook database not found: {path}")]
    ProfileNotFound { path: String },

    #[error("Backup manifest not found: {path}")]
    BackupNotFound { path: String },

    // Database errors
    #[error("Database unavailable at {path}: {reason}")]
    DatabaseUnavailable { path: String, reason: String },

    #[error("Cannot insert signature {record_id}: {reason}")]
    ConstraintViolation { record_id: String, reason: String },

    // Filesystem errors
    #[error("Signature file not found: {path}")]
    NotFound { path: String },

    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Manifest errors
    #[error("Malformed manifest line {line} ({content:?}): {reason}")]
    MalformedManifest {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Signature {record_id} has an unusable stored path: {path:?}")]
    InvalidSignaturePath { record_id: String, path: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
}

impl SigError {
    /// Builds an [`SigError::Io`] for the given path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Stable machine-readable name of the taxonomy member.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ProfileNotFound { .. } => "profile_not_found",
            Self::BackupNotFound { .. } => "backup_not_found",
            Self::DatabaseUnavailable { .. } => "database_unavailable",
            Self::ConstraintViolation { .. } => "constraint_violation",
            Self::NotFound { .. } => "not_found",
            Self::Io { .. } => "io_error",
            Self::MalformedManifest { .. } => "malformed_manifest",
            Self::InvalidSignaturePath { .. } => "invalid_signature_path",
            Self::ConfigNotFound { .. } => "config_not_found",
            Self::ConfigParse(_) => "config_parse",
            Self::ConfigInvalid(_) => "config_invalid",
        }
    }

    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound { .. }
                | Self::BackupNotFound { .. }
                | Self::ConfigNotFound { .. }
                | Self::ConfigParse(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ProfileNotFound { .. } => {
                Some("Point --src/--dst at an Outlook profile Data directory containing Outlook.sqlite")
            }
            Self::BackupNotFound { .. } => Some("Point --src at a directory created by: sigsync backup"),
            Self::ConstraintViolation { .. } => {
                Some("The profile already holds this signature; restore into a profile without it")
            }
            Self::DatabaseUnavailable { .. } => Some("Quit Outlook before running sigsync"),
            Self::ConfigNotFound { .. } => Some("Check the --config path or SIGSYNC_CONFIG"),
            _ => None,
        }
    }

    /// Process exit code for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ProfileNotFound { .. } | Self::BackupNotFound { .. } => 3,
            Self::DatabaseUnavailable { .. } | Self::ConstraintViolation { .. } => 4,
            Self::MalformedManifest { .. } | Self::InvalidSignaturePath { .. } => 5,
            Self::ConfigNotFound { .. } | Self::ConfigParse(_) | Self::ConfigInvalid(_) => 6,
            Self::NotFound { .. } | Self::Io { .. } => 1,
        }
    }
}

/// Convenience type alias for Results using SigError.
pub type Result<T> = std::result::Result<T, SigError>;

/// Extension trait for attaching a path to IO errors.
pub trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| SigError::io(path, e))
    }
}
