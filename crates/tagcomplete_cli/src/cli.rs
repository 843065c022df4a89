//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// tagcomplete - Completion candidates from ctags-style tag files
#[derive(Parser)]
#[command(name = "tagcomplete")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the candidates whose word ends with a match of PATTERN
    Complete {
        /// Keyword regular expression
        pattern: String,

        /// Additional tag files
        #[arg(short, long = "tags", value_name = "FILE")]
        tags: Vec<PathBuf>,

        /// Current buffer, passed to the tagger
        #[arg(long, value_name = "BUFFER")]
        file: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with status 1 when nothing matches
        #[arg(long)]
        fail_on_empty: bool,
    },

    /// Parse tag files and report their sizes
    Check {
        /// Tag files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
