use super::domain::{ConstructionStandard, ProjectCategory};
use crate::regions::RegionConfig;
use serde::Serialize;
use tracing::warn;

/// Multiplier applied for project density and class.
pub const fn category_multiplier(category: ProjectCategory) -> f64 {
    match category {
        ProjectCategory::Standalone => 1.0,
        ProjectCategory::MultiUnit => 1.35,
        ProjectCategory::CommercialResort => 1.65,
    }
}

/// Which table entry supplied the base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseRateSource {
    Requested,
    StandardFallback,
    /// Neither the requested nor the Standard rate exists; the structure is
    /// priced at zero.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedRates {
    pub base_rate: f64,
    pub base_rate_source: BaseRateSource,
    pub location_multiplier: f64,
    pub category_multiplier: f64,
}

/// Looks up the three rate inputs. Never fails: a missing standard falls
/// back to the Standard tier rate and a missing location to a multiplier
/// of 1.0.
pub fn resolve_rates(
    region: &RegionConfig,
    standard: ConstructionStandard,
    location: &str,
    category: ProjectCategory,
) -> ResolvedRates {
    let (base_rate, base_rate_source) = match (
        region.base_rate(standard),
        region.base_rate(ConstructionStandard::Standard),
    ) {
        (Some(rate), _) => (rate, BaseRateSource::Requested),
        (None, Some(rate)) => (rate, BaseRateSource::StandardFallback),
        (None, None) => {
            warn!(
                currency = %region.currency,
                requested = standard.label(),
                "region has no Standard base rate to fall back on"
            );
            (0.0, BaseRateSource::Missing)
        }
    };

    let location_multiplier = region.location_multiplier(location).unwrap_or(1.0);

    ResolvedRates {
        base_rate,
        base_rate_source,
        location_multiplier,
        category_multiplier: category_multiplier(category),
    }
}
