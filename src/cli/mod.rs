//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for SignPack using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// SignPack - Signed Document Export Tool
#[derive(Parser, Debug)]
#[command(name = "signpack")]
#[command(version, about, long_about = None)]
#[command(author = "SignPack Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "signpack.toml", env = "SIGNPACK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SIGNPACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List documents (or vaults) visible to the configured credentials
    List(commands::list::ListArgs),

    /// Export selected documents as size-capped ZIP archives
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
