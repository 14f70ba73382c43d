//! Show subcommand: render the properties a schema declares.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Schema YAML file
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}
