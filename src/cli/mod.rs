//! CLI argument parsing and command routing

use clap::{Parser, Subcommand};

/// claude-query: streaming Claude client with prompt-cache annotation
#[derive(Debug, Parser)]
#[command(name = "claude-query")]
#[command(about = "Streaming Claude Messages API client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a single query and stream the response
    Query {
        /// The prompt to send
        query: String,

        /// Model to use (defaults to the configured default profile)
        #[arg(short, long)]
        model: Option<String>,

        /// System prompt
        #[arg(long, default_value = "You are a helpful assistant.")]
        system: String,
    },

    /// List configured model profiles
    Models,

    /// Show version information
    Version,
}

impl Cli {
    /// Parse CLI arguments from environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
