//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for rotator using clap's derive macros.

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Rotator - banner rotation service driven by a UCB1 bandit
#[derive(Parser, Debug)]
#[command(name = "rotator")]
#[command(version)]
#[command(about = "Banner rotation service driven by a UCB1 bandit", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print a sample configuration file
    GenerateConfig {
        /// Write to this file instead of stdout
        output: Option<String>,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// 未指定子命令时默认启动服务器
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
