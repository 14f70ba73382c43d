//! CLI command definitions for ocv
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod show;
pub mod validate;

use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use show::ShowArgs;
use validate::ValidateArgs;

/// Operation configuration validator
#[derive(Parser, Debug)]
#[command(name = "ocv", author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table", global = true, value_name = "FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show schema definition
    Show(ShowArgs),

    /// Validate configuration files against a schema
    Validate(ValidateArgs),
}
