use serde_json::Value;

use finsight_core::Envelope;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            let payload = serde_json::to_string(envelope)?;
            println!("{payload}");
        }
        OutputFormat::Text => render_text(envelope)?,
    }

    Ok(())
}

fn render_text(envelope: &Envelope<Value>) -> Result<(), CliError> {
    // Conversational payloads carry their prose in `text`; anything else
    // (e.g. `companies`) falls back to pretty JSON.
    if let Some(text) = envelope.data.get("text").and_then(Value::as_str) {
        println!("{}", text.trim_end());
        if let Some(suggestion) = envelope.data.get("suggestion").and_then(Value::as_str) {
            println!("{suggestion}");
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&envelope.data)?);
    }

    for warning in &envelope.meta.warnings {
        eprintln!("note: {warning}");
    }

    Ok(())
}
