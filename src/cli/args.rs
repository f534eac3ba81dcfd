//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the check command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Execution summary with a listing of failures
    Summary,
    /// Summary followed by every individual record
    Detailed,
    /// Full report as pretty-printed JSON
    Json,
}

/// Output format for the list command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable module listing
    Human,
    /// Module-to-checker mapping as JSON
    Json,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

/// ifcheck CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "ifcheck")]
#[command(about = "Compliance check orchestrator for IFC building models")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,
}

/// Available ifcheck subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run compliance checks against a building model
    Check {
        /// Path to the model file (JSON)
        model: PathBuf,

        /// Directory with declarative checker files (default: ./tools when present)
        #[arg(short, long)]
        tools_dir: Option<PathBuf>,

        /// Only run checker modules whose identity contains this substring
        #[arg(short, long)]
        filter: Option<String>,

        /// Named parameter forwarded to every checker (repeatable)
        #[arg(short = 's', long = "set", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Output format
        #[arg(short, long, default_value = "summary")]
        output: OutputFormat,

        /// Print the execution trace
        #[arg(short, long)]
        verbose: bool,
    },

    /// List discovered checker modules and their checks
    List {
        /// Directory with declarative checker files (default: ./tools when present)
        #[arg(short, long)]
        tools_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "human")]
        output: ListFormat,
    },
}
