use serde::Serialize;

use finsight_core::{Company, FinancialDataset, Metric};

use crate::cli::CompaniesArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct CompanyCoverage {
    company: Company,
    name: &'static str,
    fiscal_years: Vec<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<Vec<&'static str>>,
}

#[derive(Debug, Serialize)]
struct CompaniesResponseData {
    companies: Vec<CompanyCoverage>,
}

pub fn run(args: &CompaniesArgs, dataset: &FinancialDataset) -> Result<CommandResult, CliError> {
    let companies = dataset
        .companies()
        .into_iter()
        .map(|company| {
            let fiscal_years = dataset
                .years(company)
                .into_iter()
                .map(|year| year.as_u16())
                .collect();

            let metrics = args.verbose.then(|| {
                Metric::ALL
                    .into_iter()
                    .filter(|metric| dataset.covers_metric(company, *metric))
                    .map(Metric::label)
                    .collect()
            });

            CompanyCoverage {
                company,
                name: company.display_name(),
                fiscal_years,
                metrics,
            }
        })
        .collect();

    Ok(CommandResult::ok(serde_json::to_value(
        CompaniesResponseData { companies },
    )?))
}
