mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let dataset = commands::load_dataset(cli.data.as_deref())?;

    let started = std::time::Instant::now();
    let command_result = match &cli.command {
        // The chat loop prints directly and never produces an envelope.
        Command::Chat => return commands::chat::run(&dataset),
        Command::Ask(args) => commands::ask::run(args, &dataset)?,
        Command::Companies(args) => commands::companies::run(args, &dataset)?,
    };

    let envelope = command_result.into_envelope(started.elapsed())?;
    output::render(&envelope, cli.format, cli.pretty)?;

    if cli.strict && (!envelope.meta.warnings.is_empty() || !envelope.errors.is_empty()) {
        return Err(CliError::StrictModeViolation {
            warning_count: envelope.meta.warnings.len(),
            error_count: envelope.errors.len(),
        });
    }

    Ok(())
}
