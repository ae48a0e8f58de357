//! Installer configuration and workspace paths

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Where the boilerplate is downloaded from
pub const BOILERPLATE_URL: &str = "https://github.com/lara-go/boilerplate/archive/master.zip";

/// Top-level directory inside the boilerplate archive
pub const BOILERPLATE_ROOT: &str = "boilerplate-master";

/// Import path the boilerplate uses to refer to itself
pub const PLACEHOLDER: &str = "github.com/lara-go/boilerplate";

/// Files whose contents get the placeholder replaced
pub const SOURCE_PATTERN: &str = "*.go";

/// Environment variable naming the Go workspace
pub const WORKSPACE_ENV: &str = "GOPATH";

/// Everything the install pipeline needs, passed in explicitly
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub archive_url: Url,
    /// Directory the archive unpacks into, relative to the extraction dir
    pub archive_root: String,
    pub placeholder: String,
    pub source_pattern: String,
    /// New projects land in `<workspace_root>/<project>`
    pub workspace_root: PathBuf,
    /// Scratch space for the download and extraction
    pub temp_dir: PathBuf,
}

impl InstallConfig {
    pub fn new(workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            archive_url: boilerplate_url(),
            archive_root: BOILERPLATE_ROOT.to_string(),
            placeholder: PLACEHOLDER.to_string(),
            source_pattern: SOURCE_PATTERN.to_string(),
            workspace_root: workspace_root.into(),
            temp_dir: std::env::temp_dir(),
        }
    }

    pub fn with_archive_url(mut self, url: Url) -> Self {
        self.archive_url = url;
        self
    }

    pub fn with_archive_root(mut self, root: impl Into<String>) -> Self {
        self.archive_root = root.into();
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    /// Final location of a project
    pub fn project_path(&self, project: &str) -> PathBuf {
        self.workspace_root.join(project)
    }
}

fn boilerplate_url() -> Url {
    Url::parse(BOILERPLATE_URL).expect("BOILERPLATE_URL is a valid URL")
}

/// Resolve the workspace root (`$GOPATH/src`)
///
/// Falls back to Go's default GOPATH (`~/go`) when the variable is unset or empty.
pub fn workspace_root() -> Result<PathBuf> {
    let gopath = std::env::var_os(WORKSPACE_ENV).filter(|v| !v.is_empty());
    workspace_root_from(gopath.as_deref().map(Path::new))
}

fn workspace_root_from(gopath: Option<&Path>) -> Result<PathBuf> {
    let gopath = match gopath {
        Some(path) => path.to_path_buf(),
        None => dirs::home_dir()
            .context("Could not determine home directory")?
            .join("go"),
    };
    Ok(gopath.join("src"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_from_gopath() {
        let root = workspace_root_from(Some(Path::new("/home/me/gocode"))).unwrap();
        assert_eq!(root, PathBuf::from("/home/me/gocode/src"));
    }

    #[test]
    fn test_workspace_root_default() {
        // Should not panic without GOPATH
        if let Ok(root) = workspace_root_from(None) {
            assert!(root.ends_with("go/src"));
        }
    }

    #[test]
    fn test_default_config() {
        let config = InstallConfig::new("/ws");
        assert_eq!(config.archive_url.as_str(), BOILERPLATE_URL);
        assert_eq!(config.archive_root, "boilerplate-master");
        assert_eq!(config.placeholder, "github.com/lara-go/boilerplate");
        assert_eq!(config.source_pattern, "*.go");
        assert_eq!(config.project_path("myproj"), PathBuf::from("/ws/myproj"));
    }

    #[test]
    fn test_config_overrides() {
        let url = Url::parse("http://localhost:8080/boilerplate.tar.gz").unwrap();
        let config = InstallConfig::new("/ws")
            .with_archive_url(url.clone())
            .with_archive_root("boilerplate-1.0")
            .with_temp_dir("/scratch");
        assert_eq!(config.archive_url, url);
        assert_eq!(config.archive_root, "boilerplate-1.0");
        assert_eq!(config.temp_dir, PathBuf::from("/scratch"));
    }
}
