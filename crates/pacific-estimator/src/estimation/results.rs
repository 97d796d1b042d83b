use super::fees::{FeeProposal, StageAmount};
use super::rates::ResolvedRates;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Cost and fee breakdown for one configuration, in the region's currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResults {
    pub construction_cost: f64,
    pub rate_per_m2: f64,
    pub contingency: f64,
    pub infra_cost: f64,
    pub resilience_premium: f64,
    pub land_legal_estimate: f64,
    pub core_rate: f64,
    pub base_structural_cost: f64,
    pub sub_total: f64,
    pub total_fee: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_percentage: Option<f64>,
    pub stage_breakdown: Vec<StageAmount>,
    pub currency: String,
    pub rates: ResolvedRates,
    pub is_live: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
}

/// Both fee structures priced against the same construction cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeComparison {
    pub construction_cost: f64,
    pub currency: String,
    pub percentage: FeeProposal,
    pub fixed: FeeProposal,
}

impl FeeComparison {
    /// Proposal with the smaller total fee; percentage wins ties.
    pub fn lower(&self) -> &FeeProposal {
        if self.fixed.total_fee < self.percentage.total_fee {
            &self.fixed
        } else {
            &self.percentage
        }
    }
}
