//! Import path rewriting
//!
//! Walks a project tree and replaces the boilerplate's self-referencing import
//! path with the new project's name in every source file.

use globset::{Glob, GlobMatcher};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::error::{IoContext, Result};

/// What to replace, with what, and in which files
#[derive(Debug, Clone)]
pub struct RewriteRules {
    pub placeholder: String,
    pub replacement: String,
    matcher: GlobMatcher,
}

impl RewriteRules {
    /// `pattern` is a glob matched against file names (e.g. `*.go`)
    pub fn new(placeholder: &str, replacement: &str, pattern: &str) -> Result<Self> {
        let matcher = Glob::new(pattern)?.compile_matcher();
        Ok(Self {
            placeholder: placeholder.to_string(),
            replacement: replacement.to_string(),
            matcher,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }

    /// Replace every placeholder occurrence, returning the new text and the count
    pub fn apply(&self, content: &str) -> (String, usize) {
        if self.placeholder.is_empty() {
            return (content.to_string(), 0);
        }
        let count = content.matches(self.placeholder.as_str()).count();
        if count == 0 {
            return (content.to_string(), 0);
        }
        (content.replace(&self.placeholder, &self.replacement), count)
    }
}

/// Totals for a rewrite pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Files that matched the pattern
    pub scanned: usize,
    /// Files written back
    pub rewritten: usize,
    pub replacements: usize,
}

/// Rewrite every matching file under `root`
///
/// Files are visited in name order. Stops at the first failure; files
/// rewritten before it stay rewritten.
pub fn rewrite_tree(root: &Path, rules: &RewriteRules) -> Result<RewriteSummary> {
    let mut summary = RewriteSummary::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !rules.matches(&name) {
            continue;
        }

        summary.scanned += 1;
        let count = rewrite_file(entry.path(), rules)?;
        if count > 0 {
            summary.rewritten += 1;
            summary.replacements += count;
        }
    }

    tracing::debug!(
        scanned = summary.scanned,
        rewritten = summary.rewritten,
        replacements = summary.replacements,
        "imports updated"
    );
    Ok(summary)
}

/// Rewrite one file in place, keeping its permissions
fn rewrite_file(path: &Path, rules: &RewriteRules) -> Result<usize> {
    let content = fs::read_to_string(path).fs_context("Failed to read", path)?;

    let (updated, count) = rules.apply(&content);
    if count == 0 {
        return Ok(0);
    }

    let permissions = fs::metadata(path)
        .fs_context("Failed to inspect", path)?
        .permissions();
    fs::write(path, updated).fs_context("Failed to write", path)?;
    fs::set_permissions(path, permissions).fs_context("Failed to set permissions on", path)?;

    tracing::debug!(path = %path.display(), replacements = count, "rewrote file");
    Ok(count)
}
