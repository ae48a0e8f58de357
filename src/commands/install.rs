//! Install command - Generate a new project from the boilerplate

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use url::Url;

use super::utils;
use larago_installer::config::{self, InstallConfig};
use larago_installer::scaffold::{self, InstallReport};

/// Overrides for the install command
#[derive(Debug, Default)]
pub struct InstallOptions {
    /// Download the boilerplate from here instead of GitHub
    pub from: Option<Url>,
    /// Directory the downloaded archive unpacks into
    pub archive_root: Option<String>,
    /// Use this directory instead of `$GOPATH/src`
    pub workspace: Option<PathBuf>,
}

/// Execute the install command
pub fn execute(project: Option<&str>, options: InstallOptions) -> Result<()> {
    let workspace_root = match options.workspace {
        Some(dir) => dir,
        None => config::workspace_root()?,
    };

    let Some(project) = project else {
        println!("{}", install_help(&workspace_root));
        return Ok(());
    };

    let mut install_config = InstallConfig::new(workspace_root);
    if let Some(url) = options.from {
        install_config = install_config.with_archive_url(url);
    }
    if let Some(root) = options.archive_root {
        install_config = install_config.with_archive_root(root);
    }

    println!(
        "Installing {} into {}",
        project.green(),
        install_config.workspace_root.display()
    );

    let report = scaffold::install(&install_config, project)
        .with_context(|| format!("Failed to install project {}", project))?;

    println!("{}", format_report(&report));
    Ok(())
}

/// Usage shown when no project name is given
pub fn install_help(workspace_root: &Path) -> String {
    format!(
        "
  Generate a new project from the boilerplate in {}

  Usage: larago install [project-name]
",
        workspace_root.display()
    )
}

fn format_report(report: &InstallReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} boilerplate ({})\n",
        "Downloaded:".green(),
        utils::format_size(report.archive_bytes)
    ));
    out.push_str(&format!(
        "{} {} files, {} directories\n",
        "Extracted:".green(),
        report.extract.files,
        report.extract.directories
    ));
    out.push_str(&format!(
        "{} {} imports in {} files\n",
        "Updated:".green(),
        report.rewrite.replacements,
        report.rewrite.rewritten
    ));
    out.push('\n');
    out.push_str(&format!(
        "New project was installed in {}

Next steps:

  1. Install Glide tool (https://glide.sh)
  2. Install dependencies using Glide

To check, run:

  $ go run cmd/app/main.go -r ./ env
",
        report.project_path.display()
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use larago_installer::scaffold::{ExtractSummary, RewriteSummary};

    #[test]
    fn test_install_help_mentions_workspace() {
        let help = install_help(Path::new("/home/me/go/src"));
        assert!(help.contains("/home/me/go/src"));
        assert!(help.contains("Usage: larago install [project-name]"));
    }

    #[test]
    fn test_format_report() {
        let report = InstallReport {
            project_path: PathBuf::from("/go/src/myproj"),
            archive_bytes: 2048,
            extract: ExtractSummary {
                directories: 4,
                files: 12,
                skipped: 0,
            },
            rewrite: RewriteSummary {
                scanned: 10,
                rewritten: 3,
                replacements: 7,
            },
        };

        let out = format_report(&report);
        assert!(out.contains("2.0 KB"));
        assert!(out.contains("12 files"));
        assert!(out.contains("7 imports"));
        assert!(out.contains("New project was installed in /go/src/myproj"));
    }

    #[test]
    fn test_execute_without_project_prints_help() {
        let options = InstallOptions {
            from: None,
            archive_root: None,
            workspace: Some(PathBuf::from("/tmp/ws")),
        };
        assert!(execute(None, options).is_ok());
    }
}
