mod format;
mod summary;
pub mod views;

pub use format::{format_amount, format_currency};
pub use views::{
    CostLine, EstimateReport, FeeLine, FinancingSummary, ProjectFact, RateSource, ReportHeadline,
};
