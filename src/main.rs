//! cygwin-builder - custom Cygwin installer builder.
//!
//! Provisions a Cygwin tree with the official bootstrap installer and wraps
//! it into a single NSIS installer executable.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process;

use cygwin_builder::commands::{self, BuildOptions};
use cygwin_builder::common::default_template_dir;
use cygwin_builder::config::Settings;
use cygwin_builder::error::BuildError;
use cygwin_builder::logging::{self, Verbosity};

#[derive(Parser)]
#[command(name = "cygwin-builder")]
#[command(about = "Cygwin installer builder")]
#[command(override_usage = "cygwin-builder [OPTIONS] /path/to/settings.json")]
struct Cli {
    /// JSON settings: installer, mirror, makensis, packages
    settings: Option<PathBuf>,

    /// Show more information
    #[arg(long)]
    verbose: bool,

    /// List cygwin mirrors
    #[arg(long = "list")]
    mirrors: bool,

    /// Add a string to the package version: CUSTOMVERSION-CYGWINVERSION
    #[arg(long = "appendversion", value_name = "CUSTOMVERSION")]
    version: Option<String>,

    /// Template tree to build from (default: buildenv/ next to the executable)
    #[arg(long)]
    template_dir: Option<PathBuf>,

    /// Where to put the finished installer (default: current directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only run preflight checks
    #[arg(long)]
    preflight: bool,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    logging::with_logging(Verbosity::from_flag(cli.verbose), || run(cli))
}

fn run(cli: Cli) -> Result<()> {
    if cli.mirrors {
        return commands::cmd_list_mirrors();
    }

    let Some(settings_path) = cli.settings else {
        usage_error(None);
    };
    let settings = match Settings::load(&settings_path) {
        Ok(settings) => settings,
        Err(err) => usage_error(Some(&err.to_string())),
    };

    let invoking_dir = std::env::current_dir().context("Failed to read current directory")?;
    let output_dir = match cli.output_dir {
        Some(dir) => invoking_dir.join(dir),
        None => invoking_dir.clone(),
    };
    let template_dir = match cli.template_dir {
        Some(dir) => invoking_dir.join(dir),
        None => default_template_dir(),
    };

    if cli.preflight {
        if commands::cmd_preflight(&settings, &template_dir, &output_dir) {
            return Ok(());
        }
        process::exit(1);
    }

    let options = BuildOptions {
        settings,
        template_dir,
        output_dir,
        version_suffix: cli.version,
    };

    match commands::cmd_build(&options) {
        Ok(installer) => {
            println!("Build Success: {}", installer.display());
            Ok(())
        }
        Err(err) => match err.downcast_ref::<BuildError>() {
            Some(build_error) => {
                println!("Build Error:\n{}", build_error);
                process::exit(1);
            }
            None => Err(err),
        },
    }
}

/// Print `message` and usage help, then exit 1.
fn usage_error(message: Option<&str>) -> ! {
    if let Some(message) = message {
        eprintln!("{}\n", message);
    }
    let _ = Cli::command().print_help();
    process::exit(1);
}
