//! tagcomplete CLI
//!
//! Completion candidates from ctags-style tag files.

mod cli;
mod commands;
mod output;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tagcomplete_core::CompletionConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_check, run_complete, run_init};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_failures) => {
            if has_failures {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Complete {
            pattern,
            tags,
            file,
            format,
            fail_on_empty,
        } => {
            let config = load_config(cli.config.as_deref())?;
            run_complete(config, pattern, tags, file.as_deref(), *format, *fail_on_empty)
        }
        Commands::Check { files } => run_check(files),
        Commands::Init { force } => run_init(*force).map(|_| false),
    }
}

fn load_config(path: Option<&Path>) -> Result<CompletionConfig> {
    if let Some(path) = path {
        return CompletionConfig::from_file(path).into_diagnostic();
    }

    if let Some(path) = CompletionConfig::discover(".") {
        info!("Using config: {}", path.display());
        return CompletionConfig::from_file(&path).into_diagnostic();
    }

    // Return default config if no file found
    info!("No config file found, using defaults");
    Ok(CompletionConfig::new())
}
