mod company;
mod fiscal_year;
mod metric;

pub use company::Company;
pub use fiscal_year::FiscalYear;
pub use metric::Metric;
