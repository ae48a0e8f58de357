//! Archive extraction
//!
//! Entries are unpacked one at a time: each entry reader and output file is
//! dropped before the next entry is opened, so the number of open descriptors
//! stays constant regardless of archive size.

use flate2::read::GzDecoder;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};

use super::error::{IoContext, Result, ScaffoldError};

const DEFAULT_DIR_MODE: u32 = 0o755;
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Supported archive containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    /// Guess the format from a file name or URL path; anything unknown is zip
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            ArchiveFormat::TarGz
        } else {
            ArchiveFormat::Zip
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

/// What an extraction wrote to disk
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub directories: usize,
    pub files: usize,
    /// Links, pax headers and `./` root entries
    pub skipped: usize,
}

impl ExtractSummary {
    fn entries(&self) -> usize {
        self.directories + self.files + self.skipped
    }
}

/// Unpack `archive` into `dest`, creating `dest` if needed
pub fn extract(archive: &Path, format: ArchiveFormat, dest: &Path) -> Result<ExtractSummary> {
    fs::create_dir_all(dest).fs_context("Failed to create", dest)?;

    let summary = match format {
        ArchiveFormat::Zip => extract_zip(archive, dest)?,
        ArchiveFormat::TarGz => extract_tar_gz(archive, dest)?,
    };

    if summary.entries() == 0 {
        return Err(ScaffoldError::malformed(archive, "archive contains no entries"));
    }

    tracing::debug!(
        directories = summary.directories,
        files = summary.files,
        skipped = summary.skipped,
        "archive extracted"
    );
    Ok(summary)
}

fn extract_zip(archive_path: &Path, dest: &Path) -> Result<ExtractSummary> {
    let file = File::open(archive_path).fs_context("Failed to open", archive_path)?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| ScaffoldError::malformed(archive_path, e))?;

    let mut summary = ExtractSummary::default();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ScaffoldError::malformed(archive_path, e))?;

        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ScaffoldError::UnsafeEntry {
                name: entry.name().to_string(),
            })?;
        let output_path = dest.join(relative);

        if entry.is_dir() {
            let mode = entry.unix_mode().unwrap_or(DEFAULT_DIR_MODE);
            create_dir(&output_path, mode)?;
            summary.directories += 1;
        } else {
            let mode = entry.unix_mode().unwrap_or(DEFAULT_FILE_MODE);
            write_file(&output_path, mode, &mut entry)?;
            summary.files += 1;
        }
    }

    Ok(summary)
}

fn extract_tar_gz(archive_path: &Path, dest: &Path) -> Result<ExtractSummary> {
    let file = File::open(archive_path).fs_context("Failed to open", archive_path)?;
    let mut archive = tar::Archive::new(GzDecoder::new(file));

    let entries = archive
        .entries()
        .map_err(|e| ScaffoldError::malformed(archive_path, e))?;

    let mut summary = ExtractSummary::default();
    for entry in entries {
        let mut entry = entry.map_err(|e| ScaffoldError::malformed(archive_path, e))?;
        let entry_type = entry.header().entry_type();

        if !entry_type.is_dir() && !entry_type.is_file() {
            tracing::debug!(?entry_type, "skipping archive entry");
            summary.skipped += 1;
            continue;
        }

        let name = entry
            .path()
            .map_err(|e| ScaffoldError::malformed(archive_path, e))?
            .into_owned();
        let relative = enclosed_name(&name).ok_or_else(|| ScaffoldError::UnsafeEntry {
            name: name.display().to_string(),
        })?;
        // `./` names the destination itself
        if relative.as_os_str().is_empty() {
            summary.skipped += 1;
            continue;
        }
        let output_path = dest.join(relative);
        let mode = entry.header().mode().ok();

        if entry_type.is_dir() {
            create_dir(&output_path, mode.unwrap_or(DEFAULT_DIR_MODE))?;
            summary.directories += 1;
        } else {
            write_file(&output_path, mode.unwrap_or(DEFAULT_FILE_MODE), &mut entry)?;
            summary.files += 1;
        }
    }

    Ok(summary)
}

/// Relative path of an entry, or `None` if it would leave the destination
///
/// An empty path means the entry is the destination itself.
fn enclosed_name(name: &Path) -> Option<PathBuf> {
    let mut result = PathBuf::new();
    for component in name.components() {
        match component {
            Component::Normal(part) => result.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(result)
}

fn create_dir(path: &Path, mode: u32) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode & 0o777);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path).fs_context("Failed to create", path)
}

fn write_file<R: Read>(path: &Path, mode: u32, content: &mut R) -> Result<u64> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).fs_context("Failed to create", parent)?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode & 0o777);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut output = options.open(path).fs_context("Failed to create", path)?;
    io::copy(content, &mut output).fs_context("Failed to extract", path)
}
