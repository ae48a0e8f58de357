//! Project scaffolding pipeline
//!
//! fetch → extract → relocate → rewrite, strictly in that order. Every stage
//! must succeed before the next one starts and the first error aborts the run.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod relocate;
pub mod rewrite;

use std::path::PathBuf;

use crate::config::InstallConfig;
use error::IoContext;

pub use error::{Result, ScaffoldError};
pub use extract::{extract, ArchiveFormat, ExtractSummary};
pub use fetch::fetch;
pub use relocate::relocate;
pub use rewrite::{rewrite_tree, RewriteRules, RewriteSummary};

/// Outcome of a successful install
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub project_path: PathBuf,
    pub archive_bytes: u64,
    pub extract: ExtractSummary,
    pub rewrite: RewriteSummary,
}

/// Scaffold `project` into the configured workspace
///
/// Download and extraction happen in a scratch directory under
/// `config.temp_dir` which is removed once this returns.
pub fn install(config: &InstallConfig, project: &str) -> Result<InstallReport> {
    let project_path = config.project_path(project);

    // Fail before downloading anything
    relocate::ensure_vacant(&project_path)?;

    let rules = RewriteRules::new(&config.placeholder, project, &config.source_pattern)?;

    let scratch = tempfile::Builder::new()
        .prefix("larago-")
        .tempdir_in(&config.temp_dir)
        .fs_context("Failed to create temporary directory in", &config.temp_dir)?;

    let format = ArchiveFormat::from_name(config.archive_url.path());
    let archive = scratch
        .path()
        .join(format!("larago-boilerplate.{}", format.extension()));

    tracing::info!(url = %config.archive_url, dest = %archive.display(), "downloading boilerplate");
    let archive_bytes = fetch(&config.archive_url, &archive)?;

    tracing::info!(archive = %archive.display(), dest = %scratch.path().display(), "extracting");
    let extracted = extract(&archive, format, scratch.path())?;

    let extracted_root = scratch.path().join(&config.archive_root);
    tracing::info!(
        from = %extracted_root.display(),
        to = %project_path.display(),
        "moving boilerplate"
    );
    relocate(&extracted_root, &project_path)?;

    tracing::info!(project = %project, "updating imports");
    let rewritten = rewrite_tree(&project_path, &rules)?;

    Ok(InstallReport {
        project_path,
        archive_bytes,
        extract: extracted,
        rewrite: rewritten,
    })
}
