//! Single-file copies and one-level directory creation.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::error::{IoResultExt, Result, SigError};

/// Copies `source` to `destination`, returning the number of bytes written.
///
/// The whole file is read into memory first. The destination directory must
/// already exist. An existing destination file is overwritten.
#[instrument(skip_all, fields(from = %source.display(), to = %destination.display()))]
pub fn copy_file(source: &Path, destination: &Path) -> Result<u64> {
    let data = fs::read(source).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            SigError::NotFound {
                path: source.display().to_string(),
            }
        } else {
            SigError::io(source, e)
        }
    })?;

    // TODO: refuse to clobber an existing destination once restore grows a --force flag
    fs::write(destination, &data).at_path(destination)?;

    let bytes = data.len() as u64;
    trace!(bytes, "File copied");
    Ok(bytes)
}

/// Creates `path` if it does not exist yet.
///
/// Only the last path component is created; missing parents are an error.
/// Returns `true` when the directory was created by this call.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn ensure_directory(path: &Path) -> Result<bool> {
    if path.is_dir() {
        trace!("Directory already present");
        return Ok(false);
    }

    match fs::create_dir(path) {
        Ok(()) => {
            debug!("Directory created");
            Ok(true)
        }
        // Lost a race with another creator; fine as long as it is a directory.
        Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(e) => Err(SigError::io(path, e)),
    }
}
