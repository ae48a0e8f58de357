//! larago: generate a new LaraGo project from the boilerplate

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

mod commands;

use larago_installer::logging;

#[derive(Parser)]
#[command(name = "larago")]
#[command(about = "LaraGo Installer", long_about = None)]
#[command(version)]
struct Cli {
    /// Print each step as it happens
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new project from the boilerplate
    Install {
        /// Project name, used as its directory and import path
        project: Option<String>,

        /// Download the boilerplate archive from this URL
        #[arg(long, value_name = "URL")]
        from: Option<Url>,

        /// Top-level directory inside the archive (default: boilerplate-master)
        #[arg(long, value_name = "DIR", requires = "from")]
        archive_root: Option<String>,

        /// Workspace directory to create the project in (default: $GOPATH/src)
        #[arg(long, value_name = "DIR")]
        workspace: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Unknown commands and arguments get the usage text, not an error
        Err(e) if matches!(
            e.kind(),
            ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument
        ) =>
        {
            return print_help()
        }
        Err(e) => e.exit(),
    };

    logging::init_cli_logger(cli.verbose);

    match cli.command {
        Some(Commands::Install {
            project,
            from,
            archive_root,
            workspace,
        }) => {
            let options = commands::install::InstallOptions {
                from,
                archive_root,
                workspace,
            };
            commands::install::execute(project.as_deref(), options)?;
        }

        None => print_help()?,
    }

    Ok(())
}

fn print_help() -> Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}
