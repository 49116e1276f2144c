use finsight_core::{EnvelopeError, FinancialDataset, Responder};

use crate::cli::AskArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &AskArgs, dataset: &FinancialDataset) -> Result<CommandResult, CliError> {
    let question = args.question.join(" ");
    let reply = Responder::new(dataset).answer(&question);

    let errors = reply
        .problems
        .iter()
        .map(|problem| EnvelopeError::new(problem.code.as_str(), problem.message.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut result = CommandResult::ok(serde_json::to_value(&reply)?).with_errors(errors);

    if let Some(year) = reply.defaulted_year {
        result = result.with_warning(format!(
            "no fiscal year in question; defaulted to FY{year}"
        ));
    }

    Ok(result)
}
