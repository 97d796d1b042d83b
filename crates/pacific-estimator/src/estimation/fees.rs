use super::domain::{BuildingType, FeeOption, ProjectCategory};
use serde::Serialize;

pub const FIXED_FEE_DOUBLE_STOREY_LOADING: f64 = 1.1;

/// Delivery stages and their share of the professional fee. Weights sum to 1.0.
pub const STAGE_WEIGHTS: [(&str, f64); 5] = [
    ("Concept Design", 0.15),
    ("Design Development", 0.20),
    ("Documentation", 0.35),
    ("Approvals", 0.10),
    ("Contract Administration", 0.20),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FixedFeeRange {
    pub min: f64,
    pub max: f64,
}

impl FixedFeeRange {
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

pub const fn fixed_fee_range(building_type: BuildingType) -> FixedFeeRange {
    let (min, max) = match building_type {
        BuildingType::SingleDwelling => (25_000.0, 35_000.0),
        BuildingType::TownhouseDuplex => (60_000.0, 90_000.0),
        BuildingType::Apartments => (150_000.0, 250_000.0),
        BuildingType::HostelGuestHouse => (50_000.0, 80_000.0),
        BuildingType::CommercialFacility => (300_000.0, 600_000.0),
        BuildingType::PublicFacility => (250_000.0, 450_000.0),
        BuildingType::ResortComplex => (500_000.0, 1_200_000.0),
    };
    FixedFeeRange { min, max }
}

/// Tiered fee rate; larger projects attract a lower percentage. Boundaries
/// stay in the lower-cost tier.
pub fn fee_percentage(construction_cost: f64) -> f64 {
    if construction_cost > 1_000_000.0 {
        7.0
    } else if construction_cost > 500_000.0 {
        8.0
    } else {
        10.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageAmount {
    pub name: &'static str,
    pub percentage: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeProposal {
    pub option: FeeOption,
    pub total_fee: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_percentage: Option<f64>,
    pub stage_breakdown: Vec<StageAmount>,
}

/// Inputs the fee calculation depends on, lifted from the configuration and
/// the earlier pipeline stages.
#[derive(Debug, Clone, Copy)]
pub struct FeeBasis {
    pub construction_cost: f64,
    pub building_type: BuildingType,
    pub double_storey: bool,
    pub category: ProjectCategory,
    pub category_multiplier: f64,
}

pub fn calculate_fee(basis: &FeeBasis, option: FeeOption) -> FeeProposal {
    let (total_fee, fee_percentage) = match option {
        FeeOption::Percentage => {
            let percentage = fee_percentage(basis.construction_cost);
            (basis.construction_cost * percentage / 100.0, Some(percentage))
        }
        FeeOption::Fixed => (fixed_fee(basis), None),
    };

    FeeProposal {
        option,
        total_fee,
        fee_percentage,
        stage_breakdown: stage_breakdown(total_fee),
    }
}

fn fixed_fee(basis: &FeeBasis) -> f64 {
    let mut fee = fixed_fee_range(basis.building_type).midpoint();
    if basis.double_storey {
        fee *= FIXED_FEE_DOUBLE_STOREY_LOADING;
    }
    if basis.category != ProjectCategory::Standalone {
        fee *= basis.category_multiplier;
    }
    fee
}

pub fn stage_breakdown(total_fee: f64) -> Vec<StageAmount> {
    STAGE_WEIGHTS
        .iter()
        .map(|&(name, weight)| StageAmount {
            name,
            percentage: weight * 100.0,
            amount: total_fee * weight,
        })
        .collect()
}
