use super::domain::{InfrastructureOptions, LandType, ProjectCategory, ProjectConfiguration};
use super::rates::ResolvedRates;
use serde::Serialize;

pub const DOUBLE_STOREY_COMPLEXITY: f64 = 1.15;
pub const RESILIENCE_PREMIUM_FACTOR: f64 = 0.12;

pub const RESTAURANT_MARKUP: f64 = 0.15;
pub const POOL_MARKUP: f64 = 0.08;
pub const CONFERENCE_MARKUP: f64 = 0.12;

pub const WATER_HARVESTING_COST: f64 = 5000.0;
pub const SEPTIC_SYSTEM_COST: f64 = 4500.0;
pub const SOLAR_SYSTEM_COST: f64 = 12000.0;

/// Flat legal and survey allowance for the land tenure.
pub const fn land_legal_cost(land_type: LandType) -> f64 {
    match land_type {
        LandType::Freehold => 1500.0,
        LandType::Leasehold => 3500.0,
        LandType::Customary => 7500.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComposedCosts {
    pub core_rate: f64,
    pub base_structural_cost: f64,
    pub resilience_premium: f64,
    pub infra_cost: f64,
    pub land_legal_estimate: f64,
}

pub fn compose_costs(rates: &ResolvedRates, config: &ProjectConfiguration) -> ComposedCosts {
    let complexity_factor = if config.double_storey {
        DOUBLE_STOREY_COMPLEXITY
    } else {
        1.0
    };

    let core_rate = rates.base_rate
        * rates.location_multiplier
        * rates.category_multiplier
        * complexity_factor
        * facility_markup(config);
    let base_structural_cost = config.floor_area * core_rate;

    let resilience_premium = if config.enhanced_resilience {
        base_structural_cost * RESILIENCE_PREMIUM_FACTOR
    } else {
        0.0
    };

    ComposedCosts {
        core_rate,
        base_structural_cost,
        resilience_premium,
        infra_cost: infrastructure_cost(&config.infrastructure, rates.location_multiplier),
        land_legal_estimate: land_legal_cost(config.land_type),
    }
}

/// Shared-facility flags only count for commercial and resort projects.
pub(crate) fn facility_markup(config: &ProjectConfiguration) -> f64 {
    if config.category != ProjectCategory::CommercialResort {
        return 1.0;
    }

    let Some(facilities) = config.shared_facilities else {
        return 1.0;
    };

    let mut markup = 1.0;
    if facilities.restaurant {
        markup += RESTAURANT_MARKUP;
    }
    if facilities.pool {
        markup += POOL_MARKUP;
    }
    if facilities.conference {
        markup += CONFERENCE_MARKUP;
    }
    markup
}

/// Scales with location but not with floor area.
pub(crate) fn infrastructure_cost(options: &InfrastructureOptions, location_multiplier: f64) -> f64 {
    [
        (options.water_harvesting, WATER_HARVESTING_COST),
        (options.septic_system, SEPTIC_SYSTEM_COST),
        (options.solar_system, SOLAR_SYSTEM_COST),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .map(|(_, base_cost)| base_cost * location_multiplier)
    .sum()
}
