use super::composer::ComposedCosts;
use serde::Serialize;

pub const CONTINGENCY_RATE: f64 = 0.07;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContingentCost {
    pub sub_total: f64,
    pub contingency: f64,
    pub construction_cost: f64,
}

pub fn apply_contingency(costs: &ComposedCosts) -> ContingentCost {
    let sub_total = costs.base_structural_cost
        + costs.resilience_premium
        + costs.infra_cost
        + costs.land_legal_estimate;
    let contingency = sub_total * CONTINGENCY_RATE;

    ContingentCost {
        sub_total,
        contingency,
        construction_cost: sub_total + contingency,
    }
}
