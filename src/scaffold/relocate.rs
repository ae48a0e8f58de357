//! Moving the extracted tree into the workspace

use fs_extra::dir::{self, CopyOptions};
use std::fs;
use std::io;
use std::path::Path;

use super::error::{IoContext, Result, ScaffoldError};

/// Move `source` to `target`, refusing to touch an existing target
///
/// The existence check and the move are not atomic.
pub fn relocate(source: &Path, target: &Path) -> Result<()> {
    ensure_vacant(target)?;

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).fs_context("Failed to create", parent)?;
    }

    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(e) if !source.exists() => Err(ScaffoldError::fs("Failed to move", source, e)),
        Err(e) => {
            // rename fails across filesystems
            tracing::debug!(error = %e, "rename failed, falling back to copy");
            move_dir(source, target)
        }
    }
}

/// Fail with `AlreadyExists` if anything is at `target`
pub fn ensure_vacant(target: &Path) -> Result<()> {
    match fs::symlink_metadata(target) {
        Ok(_) => Err(ScaffoldError::AlreadyExists(target.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ScaffoldError::fs("Failed to inspect", target, e)),
    }
}

/// Copy then delete; directories are recreated with default permissions
fn move_dir(source: &Path, target: &Path) -> Result<()> {
    let options = CopyOptions::new().copy_inside(true);
    dir::move_dir(source, target, &options)
        .map(|_| ())
        .map_err(|e| ScaffoldError::fs("Failed to move", source, into_io_error(e)))
}

fn into_io_error(e: fs_extra::error::Error) -> io::Error {
    use fs_extra::error::ErrorKind;

    let message = e.to_string();
    match e.kind {
        ErrorKind::Io(err) => err,
        ErrorKind::NotFound => io::Error::new(io::ErrorKind::NotFound, message),
        ErrorKind::PermissionDenied => io::Error::new(io::ErrorKind::PermissionDenied, message),
        ErrorKind::AlreadyExists => io::Error::new(io::ErrorKind::AlreadyExists, message),
        ErrorKind::Interrupted => io::Error::new(io::ErrorKind::Interrupted, message),
        _ => io::Error::other(message),
    }
}
