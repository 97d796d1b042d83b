//! Construction cost and professional fee estimation.
//!
//! The pipeline runs rate resolution, cost composition, contingency and fee
//! calculation in sequence. Every stage is a pure function of its inputs, so
//! identical configurations and rate tables always yield identical results.

mod composer;
mod contingency;
pub mod domain;
mod fees;
mod financing;
mod rates;
mod results;
pub mod router;

#[cfg(test)]
mod tests;

pub use composer::{compose_costs, land_legal_cost, ComposedCosts};
pub use contingency::{apply_contingency, ContingentCost, CONTINGENCY_RATE};
pub use domain::{
    normalize_key, BuildingType, ConfigurationError, ConstructionStandard, CountryKey, FeeOption,
    InfrastructureOptions, LandType, ProjectCategory, ProjectConfiguration, SharedFacilities,
};
pub use fees::{
    calculate_fee, fee_percentage, fixed_fee_range, stage_breakdown, FeeBasis, FeeProposal,
    FixedFeeRange, StageAmount, STAGE_WEIGHTS,
};
pub use financing::{
    monthly_repayment, repayment_schedule, FinancingError, LoanTerms, RepaymentSchedule,
    DEFAULT_INTEREST_RATE, DEFAULT_LOAN_TERM_YEARS,
};
pub use rates::{category_multiplier, resolve_rates, BaseRateSource, ResolvedRates};
pub use results::{CalculationResults, FeeComparison};
pub use router::estimation_router;

use crate::regions::{RegionConfig, RegionalRates};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("invalid project configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    #[error("no rate table available for {0}")]
    RegionUnavailable(CountryKey),
    #[error("invalid loan terms: {0}")]
    InvalidFinancing(#[from] FinancingError),
}

/// Stateless estimator; holds no data between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct EstimationEngine;

impl EstimationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Validates `config` then prices it against `region`.
    pub fn estimate(
        &self,
        config: &ProjectConfiguration,
        region: &RegionConfig,
    ) -> Result<CalculationResults, EstimateError> {
        config.validate()?;

        let stages = CostStages::run(config, region);
        let fee = calculate_fee(&stages.fee_basis(config), config.selected_fee_option);

        debug!(
            country = config.country.key(),
            base_rate = stages.rates.base_rate,
            location_multiplier = stages.rates.location_multiplier,
            construction_cost = stages.cost.construction_cost,
            total_fee = fee.total_fee,
            "estimate computed"
        );

        Ok(CalculationResults {
            construction_cost: stages.cost.construction_cost,
            rate_per_m2: stages.cost.construction_cost / config.floor_area,
            contingency: stages.cost.contingency,
            infra_cost: stages.composed.infra_cost,
            resilience_premium: stages.composed.resilience_premium,
            land_legal_estimate: stages.composed.land_legal_estimate,
            core_rate: stages.composed.core_rate,
            base_structural_cost: stages.composed.base_structural_cost,
            sub_total: stages.cost.sub_total,
            total_fee: fee.total_fee,
            fee_percentage: fee.fee_percentage,
            stage_breakdown: fee.stage_breakdown,
            currency: region.currency.clone(),
            rates: stages.rates,
            is_live: region.is_live,
            last_sync: region.last_sync,
        })
    }

    /// Looks up the configuration's country in `rates` before estimating.
    pub fn estimate_with(
        &self,
        config: &ProjectConfiguration,
        rates: &RegionalRates,
    ) -> Result<CalculationResults, EstimateError> {
        let region = rates
            .region(config.country)
            .ok_or(EstimateError::RegionUnavailable(config.country))?;
        self.estimate(config, region)
    }

    /// Prices both fee structures for the same project, ignoring
    /// `selected_fee_option`.
    pub fn compare_fee_options(
        &self,
        config: &ProjectConfiguration,
        region: &RegionConfig,
    ) -> Result<FeeComparison, EstimateError> {
        config.validate()?;

        let stages = CostStages::run(config, region);
        let basis = stages.fee_basis(config);

        Ok(FeeComparison {
            construction_cost: stages.cost.construction_cost,
            currency: region.currency.clone(),
            percentage: calculate_fee(&basis, FeeOption::Percentage),
            fixed: calculate_fee(&basis, FeeOption::Fixed),
        })
    }
}

struct CostStages {
    rates: ResolvedRates,
    composed: ComposedCosts,
    cost: ContingentCost,
}

impl CostStages {
    fn run(config: &ProjectConfiguration, region: &RegionConfig) -> Self {
        let rates = resolve_rates(region, config.standard, &config.location, config.category);
        let composed = compose_costs(&rates, config);
        let cost = apply_contingency(&composed);
        Self {
            rates,
            composed,
            cost,
        }
    }

    fn fee_basis(&self, config: &ProjectConfiguration) -> FeeBasis {
        FeeBasis {
            construction_cost: self.cost.construction_cost,
            building_type: config.building_type,
            double_storey: config.double_storey,
            category: config.category,
            category_multiplier: self.rates.category_multiplier,
        }
    }
}
