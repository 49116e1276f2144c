//! Behavior-driven tests for dataset construction and CSV ingestion
//!
//! These tests verify HOW the metric store is built and guarded, focusing
//! on user-visible outcomes when swapping in external data.

use std::fs;

use tempfile::tempdir;

use finsight_tests::{fy, Company, FinancialDataset, FinancialFact, Metric};

const CSV_HEADER: &str = "Company,Fiscal Year,Total Revenue ($M),Net Income ($M),\
Total Assets ($M),Total Liabilities ($M),Cash Flow from Operating Activities ($M)";

#[test]
fn every_bundled_triple_answers_a_value_lookup() {
    // Given: The bundled dataset
    let dataset = FinancialDataset::bundled();

    // Then: Every company/metric/year combination has exactly one figure
    for company in Company::ALL {
        for metric in Metric::ALL {
            for year in [2022, 2023, 2024] {
                assert!(
                    dataset.value(company, metric, fy(year)).is_some(),
                    "missing {company} {metric} FY{year}"
                );
            }
        }
    }
}

#[test]
fn growth_matches_the_ratio_formula_for_all_covered_pairs() {
    // Given: The bundled dataset
    let dataset = FinancialDataset::bundled();

    // Then: Growth equals (v[y] - v[y-1]) / v[y-1] wherever both years exist
    for company in Company::ALL {
        for metric in Metric::ALL {
            for year in [2023, 2024] {
                let current = dataset.value(company, metric, fy(year)).expect("covered");
                let base = dataset.value(company, metric, fy(year - 1)).expect("covered");
                let growth = dataset
                    .year_over_year_growth(company, metric, fy(year))
                    .expect("both years covered");
                assert!(
                    (growth - (current - base) / base).abs() < 1e-12,
                    "growth mismatch for {company} {metric} FY{year}"
                );
            }
        }
    }
}

#[test]
fn user_can_swap_in_a_csv_export() {
    // Given: A CSV export with thousands separators, as spreadsheets write
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("financial_data.csv");
    fs::write(
        &path,
        format!(
            "{CSV_HEADER}\n\
             Apple,2023,\"383,285\",\"96,995\",\"352,583\",\"290,437\",\"110,543\"\n\
             Apple,2024,\"391,035\",\"93,736\",\"364,980\",\"308,030\",\"118,254\"\n"
        ),
    )
    .expect("write csv");

    // When: The dataset is loaded from the file
    let dataset = FinancialDataset::from_csv_path(&path).expect("must load");

    // Then: Figures and coverage reflect the file, not the bundled table
    assert_eq!(dataset.companies(), vec![Company::Apple]);
    assert_eq!(dataset.latest_year(Company::Apple), Some(fy(2024)));
    assert_eq!(
        dataset.value(Company::Apple, Metric::NetIncome, fy(2023)),
        Some(96_995.0)
    );

    // And: Growth works across the two loaded years
    let growth = dataset
        .year_over_year_growth(Company::Apple, Metric::TotalRevenue, fy(2024))
        .expect("both years covered");
    assert!((growth - (391_035.0 - 383_285.0) / 383_285.0).abs() < 1e-12);
}

#[test]
fn csv_with_a_bad_figure_names_the_row_and_column() {
    // Given: A CSV with a non-numeric net income
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.csv");
    fs::write(
        &path,
        format!("{CSV_HEADER}\nApple,2023,1,n/a,3,4,5\n"),
    )
    .expect("write csv");

    // When: Loading is attempted
    let error = FinancialDataset::from_csv_path(&path).expect_err("must fail");

    // Then: The message pinpoints the problem
    let message = error.to_string();
    assert!(message.contains("row 2"), "unexpected message: {message}");
    assert!(message.contains("Net Income ($M)"), "unexpected message: {message}");
}

#[test]
fn duplicate_rows_are_rejected() {
    // Given: The same triple twice
    let fact = FinancialFact::new(Company::Tesla, Metric::TotalAssets, fy(2023), 1.0)
        .expect("finite");

    // When/Then: The builder refuses the dataset
    assert!(FinancialDataset::from_facts([fact, fact]).is_err());
}

#[test]
fn an_injected_dataset_fully_replaces_the_bundled_figures() {
    // Given: A tiny handwritten dataset
    let facts = [
        FinancialFact::new(Company::Microsoft, Metric::TotalRevenue, fy(2023), 10.0)
            .expect("finite"),
    ];
    let dataset = FinancialDataset::from_facts(facts).expect("valid dataset");

    // Then: Only the injected coverage is visible
    assert_eq!(dataset.companies(), vec![Company::Microsoft]);
    assert!(dataset
        .value(Company::Apple, Metric::TotalRevenue, fy(2023))
        .is_none());
    assert_eq!(
        dataset.value(Company::Microsoft, Metric::TotalRevenue, fy(2023)),
        Some(10.0)
    );
}
