//! Errors raised by the scaffolding pipeline

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Failed to download {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Download of {url} failed with HTTP status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed archive {}: {message}", .path.display())]
    MalformedArchive { path: PathBuf, message: String },

    #[error("Archive entry escapes the destination directory: {name}")]
    UnsafeEntry { name: String },

    #[error("{action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Project already exists in {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to walk project tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

impl ScaffoldError {
    /// Wrap an I/O failure together with the path it happened on
    pub fn fs(action: &'static str, path: &Path, source: io::Error) -> Self {
        ScaffoldError::Filesystem {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn malformed(path: &Path, message: impl ToString) -> Self {
        ScaffoldError::MalformedArchive {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

/// Attach a path and an action to an `io::Result`
pub(crate) trait IoContext<T> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|e| ScaffoldError::fs(action, path, e))
    }
}
