//! Operation Configuration Validator
//!
//! Reports missing, provided and obsolete properties of YAML configuration
//! files against a declared schema.

use anyhow::{Context, Result};
use clap::Parser;
use opconf_validator::cli::show::ShowArgs;
use opconf_validator::cli::validate::ValidateArgs;
use opconf_validator::cli::{Cli, Command};
use opconf_validator::format::{OutputFormat, render_schema, render_verdicts};
use opconf_validator::input::{load_documents, load_schema};
use opconf_validator::reconcile::{Summary, reconcile};
use std::fs::OpenOptions;
use std::io::Write;
use std::process::ExitCode;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

fn init_logging(log: &str, verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    match log {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)
                .with_context(|| format!("cannot open log file {}", filename))?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn run_show(args: &ShowArgs, format: OutputFormat) -> Result<ExitCode> {
    let schema = load_schema(&args.schema)?;
    let rendered = render_schema(&schema.properties, format)?;
    print(&rendered)?;
    Ok(ExitCode::SUCCESS)
}

fn run_validate(args: &ValidateArgs, format: OutputFormat) -> Result<ExitCode> {
    let schema = load_schema(&args.schema)?;
    let documents = load_documents(args.configs.as_slice())?;

    let verdicts = reconcile(&schema, &documents);
    let summary = Summary::of(&verdicts);
    info!(
        properties = schema.properties.len(),
        documents = documents.len(),
        flaws = summary.flaws,
        "Validation finished"
    );

    let rendered = render_verdicts(&verdicts, format)?;
    print(&rendered)?;

    let status = summary.exit_status(args.strict);
    if status != 0 {
        debug!(flaws = summary.flaws, "Strict mode: exiting with failure");
    }
    Ok(ExitCode::from(status))
}

fn print(rendered: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log, cli.verbose)?;

    match &cli.command {
        Command::Show(args) => run_show(args, cli.format),
        Command::Validate(args) => run_validate(args, cli.format),
    }
}
