//! Regional rate tables: currency, building code, location multipliers and
//! base rates per construction standard for each supported country.

mod defaults;
mod import;

pub use import::{RateImportError, RateOverride, RateOverrideField, RateSheetImporter};

use crate::estimation::{ConstructionStandard, CountryKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub currency: String,
    pub building_code: String,
    pub locations: BTreeMap<String, f64>,
    pub base_rates: BTreeMap<ConstructionStandard, f64>,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
}

impl RegionConfig {
    /// Location with the lowest multiplier, usually the main urban centre.
    /// Ties resolve alphabetically.
    pub fn primary_location(&self) -> Option<&str> {
        self.locations
            .iter()
            .min_by(|(left_name, left), (right_name, right)| {
                left.total_cmp(right).then_with(|| left_name.cmp(right_name))
            })
            .map(|(name, _)| name.as_str())
    }

    pub fn base_rate(&self, standard: ConstructionStandard) -> Option<f64> {
        self.base_rates.get(&standard).copied()
    }

    pub fn location_multiplier(&self, location: &str) -> Option<f64> {
        self.locations.get(location).copied()
    }
}

/// Rate book covering every country the estimator serves. Treated as an
/// immutable value: overrides produce a new book rather than mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalRates {
    regions: HashMap<CountryKey, RegionConfig>,
}

impl RegionalRates {
    pub fn new(regions: HashMap<CountryKey, RegionConfig>) -> Self {
        Self { regions }
    }

    /// Built-in rate tables for the seven Pacific markets.
    pub fn pacific_defaults() -> Self {
        Self::new(defaults::pacific_regions())
    }

    pub fn region(&self, country: CountryKey) -> Option<&RegionConfig> {
        self.regions.get(&country)
    }

    /// Regions in the canonical country order.
    pub fn iter(&self) -> impl Iterator<Item = (CountryKey, &RegionConfig)> + '_ {
        CountryKey::ordered()
            .into_iter()
            .filter_map(|country| self.regions.get(&country).map(|region| (country, region)))
    }

    /// Applies `overrides` on top of this book. Every region touched by at
    /// least one override is flagged live and stamped with `synced_at`.
    pub fn with_overrides(&self, overrides: &[RateOverride], synced_at: DateTime<Utc>) -> Self {
        let mut regions = self.regions.clone();

        for rate_override in overrides {
            let Some(region) = regions.get_mut(&rate_override.country) else {
                continue;
            };

            match &rate_override.field {
                RateOverrideField::BaseRate { standard, rate } => {
                    region.base_rates.insert(*standard, *rate);
                }
                RateOverrideField::Location { name, multiplier } => {
                    region.locations.insert(name.clone(), *multiplier);
                }
                RateOverrideField::Currency(code) => region.currency = code.clone(),
                RateOverrideField::BuildingCode(code) => region.building_code = code.clone(),
            }

            region.is_live = true;
            region.last_sync = Some(synced_at);
        }

        Self { regions }
    }
}

impl Default for RegionalRates {
    fn default() -> Self {
        Self::pacific_defaults()
    }
}
