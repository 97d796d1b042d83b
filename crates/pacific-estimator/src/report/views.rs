use crate::estimation::FeeOption;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    Live,
    Standard,
}

impl RateSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "Live market rates",
            Self::Standard => "Standard regional rates",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectFact {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostLine {
    pub label: &'static str,
    pub amount: f64,
    pub display: String,
    /// Share of the construction cost, 0-100.
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeeLine {
    pub stage: &'static str,
    pub percentage: f64,
    pub amount: f64,
    pub display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportHeadline {
    pub construction_cost: String,
    pub rate_per_m2: String,
    pub total_fee: String,
    pub fee_option: FeeOption,
    pub fee_basis: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancingSummary {
    pub interest_rate: f64,
    pub term_years: u32,
    pub monthly_repayment: String,
    pub total_interest: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub title: String,
    pub currency: String,
    pub building_code: String,
    pub rate_source: RateSource,
    pub rate_source_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<String>,
    pub headline: ReportHeadline,
    pub project: Vec<ProjectFact>,
    pub cost_lines: Vec<CostLine>,
    pub fee_lines: Vec<FeeLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<FinancingSummary>,
    /// Caveats about the rates behind the figures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
