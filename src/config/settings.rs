//! User settings loaded from an optional TOML file.
//!
//! ```toml
//! # ~/.config/sigsync/config.toml
//! profile_root = "~/Library/Group Containers/UBF8T346G9.Office/Outlook/Outlook 15 Profiles/Work/Data"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use super::path::{default_profile_root, default_settings_path, expand_home};
use crate::error::{Result, SigError};

/// Persistent user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Profile used when `--src` (backup) or `--dst` (restore) is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_root: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields default settings; a missing file that
    /// was named explicitly is an error.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => load_settings(path),
            None => {
                let path = default_settings_path()?;
                if path.is_file() {
                    load_settings(&path)
                } else {
                    debug!(path = %path.display(), "No settings file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Picks the profile root: explicit value, then settings, then the
    /// platform default.
    pub fn resolve_profile_root(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return expand_home(path);
        }
        if let Some(path) = &self.profile_root {
            trace!(path = %path.display(), "Using profile root from settings");
            return expand_home(path);
        }
        default_profile_root()
    }
}

/// Loads settings from a TOML file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SigError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            SigError::io(path, e)
        }
    })?;
    let settings = load_settings_from_str(&content)?;
    info!(profile_root = ?settings.profile_root, "Settings loaded");
    Ok(settings)
}

/// Parses settings from TOML text.
pub fn load_settings_from_str(content: &str) -> Result<Settings> {
    toml::from_str(content).map_err(|e| SigError::ConfigParse(format!("TOML: {e}")))
}
