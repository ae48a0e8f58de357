//! Archive download

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use url::Url;

use super::error::{IoContext, Result, ScaffoldError};

/// Download `url` into `dest`, returning the number of bytes written
///
/// The destination is created (or truncated) before the request goes out, so a
/// failed download leaves an empty or partial file behind.
pub fn fetch(url: &Url, dest: &Path) -> Result<u64> {
    let output = File::create(dest).fs_context("Failed to create", dest)?;

    tracing::debug!(%url, dest = %dest.display(), "requesting archive");
    let mut response = reqwest::blocking::get(url.clone()).map_err(|e| ScaffoldError::Network {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScaffoldError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    let mut writer = BufWriter::new(output);
    let written = io::copy(&mut response, &mut writer).fs_context("Failed to write", dest)?;
    writer.flush().fs_context("Failed to write", dest)?;

    tracing::debug!(bytes = written, "archive downloaded");
    Ok(written)
}
