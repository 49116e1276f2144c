pub mod ask;
pub mod chat;
pub mod companies;

use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use finsight_core::{Envelope, EnvelopeError, EnvelopeMeta, FinancialDataset};

use crate::error::CliError;

const SCHEMA_VERSION: &str = "v1.0.0";

/// Intermediate command output, assembled into an envelope by `main`.
pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<EnvelopeError>) -> Self {
        self.errors.extend(errors);
        self
    }

    pub fn into_envelope(self, elapsed: Duration) -> Result<Envelope<Value>, CliError> {
        let mut meta = EnvelopeMeta::new(
            Uuid::new_v4().to_string(),
            SCHEMA_VERSION,
            elapsed.as_millis() as u64,
        )?;

        for warning in self.warnings {
            meta.push_warning(warning);
        }

        Envelope::with_errors(meta, self.data, self.errors).map_err(CliError::from)
    }
}

/// Builds the metric store: bundled figures, or a CSV export when
/// `--data` is given.
pub fn load_dataset(path: Option<&Path>) -> Result<FinancialDataset, CliError> {
    let dataset = match path {
        Some(path) => FinancialDataset::from_csv_path(path)?,
        None => FinancialDataset::bundled(),
    };

    debug!(facts = dataset.fact_count(), "dataset loaded");
    Ok(dataset)
}
