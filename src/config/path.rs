//! Path resolution helpers: `~` expansion and the platform default profile.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Result, SigError};

/// Location of the "Main Profile" data directory below the home directory.
pub const DEFAULT_PROFILE_SUBPATH: &str =
    "Library/Group Containers/UBF8T346G9.Office/Outlook/Outlook 15 Profiles/Main Profile/Data";

/// Expand a leading `~` to the home directory.
///
/// Other paths are returned unchanged; relative paths stay relative to the
/// current working directory.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    trace!(path = %path.display(), "Resolving path");

    let path_str = path.to_string_lossy();
    if path_str == "~" || path_str.starts_with("~/") {
        let home = home_dir()?;
        let rest = path_str.strip_prefix("~/").unwrap_or("");
        let resolved = if rest.is_empty() { home } else { home.join(rest) };
        debug!(
            original = %path.display(),
            resolved = %resolved.display(),
            "Expanded home directory path"
        );
        return Ok(resolved);
    }

    Ok(path.to_path_buf())
}

/// Resolve the user's home directory (cross-platform).
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| SigError::ConfigInvalid("Could not determine home directory".to_string()))
}

/// The mail client's standard profile location for the current user.
pub fn default_profile_root() -> Result<PathBuf> {
    Ok(home_dir()?.join(DEFAULT_PROFILE_SUBPATH))
}

/// Default settings file: `<config dir>/sigsync/config.toml`.
pub fn default_settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        SigError::ConfigInvalid("Could not determine configuration directory".to_string())
    })?;
    Ok(config_dir.join("sigsync").join("config.toml"))
}
