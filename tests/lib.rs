// Test library for finsight behavior tests
pub use finsight_core::{
    interpret, ChatQuery, Company, FinancialDataset, FinancialFact, FiscalYear, Metric,
    ParseFailure, ProblemCode, Reply, ReplyData, RequestKind, Responder,
};

/// A plausible fiscal year, for test brevity.
pub fn fy(year: u16) -> FiscalYear {
    FiscalYear::new(year).expect("plausible fiscal year")
}
