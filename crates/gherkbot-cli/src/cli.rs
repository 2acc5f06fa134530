//! Command dispatch for the `gherkbot` entrypoint.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result, bail};
use gherkbot::{ConvertError, convert_file, sync_with, write_output};
use tracing::debug;

use crate::config::{CliConfig, LogLevel};
use crate::logging::init_logging;
use crate::output::{write_converted, write_script, write_sync_report, write_sync_report_json};

/// Convert Gherkin feature files into Robot Framework test scripts.
#[derive(Parser, Debug)]
#[command(name = "gherkbot", author, version, about)]
pub(crate) struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    /// Extension of feature files when scanning directories.
    #[arg(long, global = true, value_parser = NonEmptyStringValueParser::new())]
    source_ext: Option<String>,
    /// Extension given to generated scripts.
    #[arg(long, global = true, value_parser = NonEmptyStringValueParser::new())]
    target_ext: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

/// Supported commands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Convert a single feature file.
    Convert(ConvertArgs),
    /// Mirror a directory of feature files into a directory of scripts.
    Sync(SyncArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ConvertArgs {
    /// Feature file to convert.
    input: PathBuf,
    /// Write the script to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print the script to stdout even when writing a file.
    #[arg(short, long)]
    show: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SyncArgs {
    /// Directory containing feature files.
    input_dir: PathBuf,
    /// Directory receiving generated scripts.
    output_dir: PathBuf,
    /// Emit the sync report as JSON.
    #[arg(long)]
    json: bool,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_env()
        .wrap_err("failed to read configuration from the environment")?
        .apply_overrides(cli.log_level, cli.source_ext, cli.target_ext)
        .wrap_err("invalid command line flag")?;
    init_logging(&config);
    debug!(version = env!("CARGO_PKG_VERSION"), ?config, "starting gherkbot");

    match cli.command {
        Commands::Convert(args) => handle_convert(&args),
        Commands::Sync(args) => handle_sync(&args, &config),
    }
}

fn handle_convert(args: &ConvertArgs) -> Result<()> {
    if !args.input.is_file() {
        bail!("File '{}' does not exist.", args.input.display());
    }
    let script = match convert_file(&args.input) {
        Ok(script) => script,
        Err(ConvertError::Parse { source, .. }) => {
            bail!("Failed to parse '{}': {source}", args.input.display())
        }
        Err(error) => return Err(error.into()),
    };

    let mut stdout = io::stdout();
    if args.output.is_none() || args.show {
        write_script(&mut stdout, &script)?;
    }
    if let Some(path) = args.output.as_deref() {
        write_output(path, &script)?;
        write_converted(&mut stdout, path)?;
    }
    stdout.flush().wrap_err("failed to flush conversion output")
}

fn handle_sync(args: &SyncArgs, config: &CliConfig) -> Result<()> {
    let report = sync_with(&args.input_dir, &args.output_dir, &config.sync_options())
        .wrap_err_with(|| {
            format!(
                "failed to synchronise {} into {}",
                args.input_dir.display(),
                args.output_dir.display()
            )
        })?;

    let mut stdout = io::stdout();
    if args.json {
        write_sync_report_json(&mut stdout, &report)?;
    } else {
        write_sync_report(&mut stdout, &report)?;
    }
    stdout.flush().wrap_err("failed to flush sync report")
}
