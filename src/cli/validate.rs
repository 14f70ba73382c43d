//! Validate subcommand: check configuration files against a schema.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate subcommand
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema YAML file
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Configuration YAML files; for declared properties the first file that sets a key wins
    #[arg(value_name = "CONFIG", required = true, num_args = 1..)]
    pub configs: Vec<PathBuf>,

    /// Exit with a non-zero status when any flaw is found
    #[arg(long)]
    pub strict: bool,
}
