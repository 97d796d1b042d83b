use std::collections::BTreeMap;

use crate::estimation::{
    BuildingType, ConstructionStandard, CountryKey, FeeOption, InfrastructureOptions, LandType,
    ProjectCategory, ProjectConfiguration,
};
use crate::regions::{RegionConfig, RegionalRates};

pub(super) const EPSILON: f64 = 1e-6;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn fiji() -> RegionConfig {
    RegionalRates::pacific_defaults()
        .region(CountryKey::Fiji)
        .cloned()
        .expect("fiji rates seeded")
}

/// Region carrying only Basic and Standard rates and a single location.
pub(super) fn sparse_region() -> RegionConfig {
    RegionConfig {
        currency: "XPF".to_string(),
        building_code: "Test Code".to_string(),
        locations: BTreeMap::from([("Harbour".to_string(), 1.2)]),
        base_rates: BTreeMap::from([
            (ConstructionStandard::Basic, 1000.0),
            (ConstructionStandard::Standard, 2000.0),
        ]),
        is_live: false,
        last_sync: None,
    }
}

/// Fiji single dwelling: 160 m², Standard, urban Viti Levu, Freehold.
pub(super) fn baseline_house() -> ProjectConfiguration {
    ProjectConfiguration {
        country: CountryKey::Fiji,
        category: ProjectCategory::Standalone,
        building_type: BuildingType::SingleDwelling,
        floor_area: 160.0,
        standard: ConstructionStandard::Standard,
        location: "Viti Levu Urban".to_string(),
        double_storey: false,
        shared_facilities: None,
        infrastructure: InfrastructureOptions::default(),
        land_type: LandType::Freehold,
        enhanced_resilience: false,
        selected_fee_option: FeeOption::Percentage,
        unit_count: None,
        room_keys: None,
    }
}

pub(super) fn resort(building_type: BuildingType) -> ProjectConfiguration {
    ProjectConfiguration {
        category: ProjectCategory::CommercialResort,
        building_type,
        floor_area: 2000.0,
        standard: ConstructionStandard::Premium,
        room_keys: Some(20),
        ..baseline_house()
    }
}
