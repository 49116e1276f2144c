//! CLI argument definitions for finsight.
//!
//! The CLI exposes one-shot questions (`ask`), an interactive chat loop
//! (`chat`), and a dataset coverage listing (`companies`).
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `text` | Output format (text, json, ndjson) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings and reply problems as failures |
//! | `--data` | bundled | Load the dataset from a CSV export |
//!
//! # Examples
//!
//! ```bash
//! # One-shot question
//! finsight ask "What is Apple's revenue for 2023?"
//!
//! # Machine-readable envelope
//! finsight --format json --pretty ask microsoft net income growth
//!
//! # Interactive session
//! finsight chat
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Financial-insights chatbot for canned company statements.
///
/// Answers questions about Microsoft, Tesla, and Apple: total revenue,
/// net income, total assets, total liabilities, operating cash flow, and
/// their year-over-year growth rates, for fiscal years 2022-2024.
#[derive(Debug, Parser)]
#[command(
    name = "finsight",
    author,
    version,
    about = "Financial-insights chatbot for canned company statements"
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - text: The reply prose only (default)
    /// - json: Single JSON envelope
    /// - ndjson: One JSON envelope per line
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and reply problems as failures (exit code 5).
    ///
    /// Useful for CI/CD pipelines that need strict validation.
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Load the dataset from a CSV export instead of the bundled figures.
    ///
    /// Expected columns: Company, Fiscal Year, and one "<Metric> ($M)"
    /// column per metric.
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Reply prose for humans.
    Text,
    /// Single JSON envelope.
    Json,
    /// Newline-delimited JSON (one envelope per line).
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a single question and print the answer.
    ///
    /// # Examples
    ///
    ///   finsight ask "What is Apple's revenue for 2023?"
    ///   finsight ask tesla cash flow 2024
    Ask(AskArgs),

    /// Start an interactive chat session.
    Chat,

    /// List dataset coverage per company.
    ///
    /// # Examples
    ///
    ///   finsight companies
    ///   finsight companies --verbose --format json
    Companies(CompaniesArgs),
}

/// Arguments for the `ask` command.
#[derive(Debug, Args)]
pub struct AskArgs {
    /// The question, as one quoted string or as separate words.
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,
}

/// Arguments for the `companies` command.
#[derive(Debug, Args)]
pub struct CompaniesArgs {
    /// Include the covered metrics for each company.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}
