pub mod explain;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

use crate::types::Level;

#[derive(Parser, Debug)]
#[command(name = "yamllint", version, about = "Style linter for YAML documents")]
pub struct Cli {
    /// Print debug logs (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint YAML files
    Check {
        /// Files or directories to lint
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Path to config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Minimum level that causes a non-zero exit code
        #[arg(long, default_value = "error")]
        fail_on: Level,

        /// Only report error-level problems
        #[arg(long)]
        no_warnings: bool,
    },
    /// Create a default .yamllint.toml
    Init,
    /// Explain what a rule checks and how to configure it (omit rule to list all)
    Explain {
        /// Rule name (e.g., indentation, trailing-spaces, key-duplicates)
        rule: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Github,
    /// One `file:line:col: [level] message (rule)` line per problem
    Parsable,
}
