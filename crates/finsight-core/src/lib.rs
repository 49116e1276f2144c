//! Core contracts for finsight.
//!
//! This crate contains:
//! - The fixed company/metric/fiscal-year vocabulary and validation
//! - The immutable financial dataset (metric store) with CSV ingestion
//! - The keyword interpreter that maps free text to typed requests
//! - The responder that turns typed requests into replies
//! - The response envelope used by machine-readable output

pub mod dataset;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod interpreter;
pub mod responder;

pub use dataset::{FinancialDataset, FinancialFact};
pub use domain::{Company, FiscalYear, Metric};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{DatasetError, GrowthError, ValidationError};
pub use interpreter::{interpret, ChatQuery, ParseFailure, RequestKind};
pub use responder::{
    CompanySummary, MetricFigure, MetricGrowth, Problem, ProblemCode, Reply, ReplyData, Responder,
};
