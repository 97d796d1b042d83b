use pacific_estimator::estimation::{
    BuildingType, ConstructionStandard, CountryKey, EstimationEngine, FeeOption,
    InfrastructureOptions, LandType, ProjectCategory, ProjectConfiguration, SharedFacilities,
};
use pacific_estimator::regions::RegionalRates;

fn approx(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} (±{tolerance}), got {actual}"
    );
}

fn fiji_house() -> ProjectConfiguration {
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

#[test]
fn baseline_standalone_house_in_fiji() {
    let rates = RegionalRates::pacific_defaults();

    let results = EstimationEngine::new()
        .estimate_with(&fiji_house(), &rates)
        .expect("baseline configuration is valid");

    approx(results.core_rate, 2800.0, 1e-9);
    approx(results.base_structural_cost, 448_000.0, 1e-6);
    approx(results.sub_total, 449_500.0, 1e-6);
    approx(results.contingency, 31_465.0, 1e-6);
    approx(results.construction_cost, 480_965.0, 1e-6);
    approx(results.rate_per_m2, 3006.03, 0.005);
    assert_eq!(results.fee_percentage, Some(10.0));
}

#[test]
fn resilience_and_solar_on_baseline_house() {
    let rates = RegionalRates::pacific_defaults();
    let mut config = fiji_house();
    config.enhanced_resilience = true;
    config.infrastructure.solar_system = true;

    let results = EstimationEngine::new()
        .estimate_with(&config, &rates)
        .expect("configuration is valid");

    approx(results.resilience_premium, 53_760.0, 1e-6);
    approx(results.infra_cost, 12_000.0, 1e-9);
    approx(results.sub_total, 515_260.0, 1e-6);
    approx(results.contingency, 36_068.2, 1e-6);
    approx(results.construction_cost, 551_328.2, 1e-6);
    // crosses the 500,000 threshold into the 8% tier
    assert_eq!(results.fee_percentage, Some(8.0));
    approx(results.total_fee, 551_328.2 * 0.08, 1e-6);
}

#[test]
fn fixed_fee_for_double_storey_projects() {
    let rates = RegionalRates::pacific_defaults();
    let engine = EstimationEngine::new();

    let mut house = fiji_house();
    house.double_storey = true;
    house.selected_fee_option = FeeOption::Fixed;
    let house_results = engine.estimate_with(&house, &rates).expect("valid");
    approx(house_results.total_fee, 30_000.0 * 1.1, 1e-9);
    assert_eq!(house_results.fee_percentage, None);

    let region = rates.region(CountryKey::Tonga).expect("tonga rates");
    let mut hostel = ProjectConfiguration::seeded(CountryKey::Tonga, ProjectCategory::MultiUnit, region)
        .with_building_type(BuildingType::HostelGuestHouse);
    hostel.double_storey = true;
    hostel.selected_fee_option = FeeOption::Fixed;
    let hostel_results = engine.estimate(&hostel, region).expect("valid");
    approx(hostel_results.total_fee, 65_000.0 * 1.1 * 1.35, 1e-6);

    let stage_total: f64 = hostel_results
        .stage_breakdown
        .iter()
        .map(|stage| stage.amount)
        .sum();
    approx(stage_total, hostel_results.total_fee, 1e-6);
}

#[test]
fn resort_with_facilities_on_outer_island() {
    let rates = RegionalRates::pacific_defaults();
    let region = rates.region(CountryKey::CookIslands).expect("cook islands rates");
    let mut config = ProjectConfiguration::seeded(
        CountryKey::CookIslands,
        ProjectCategory::CommercialResort,
        region,
    )
    .with_building_type(BuildingType::ResortComplex);
    config.location = "Northern Group".to_string();
    config.shared_facilities = Some(SharedFacilities {
        restaurant: true,
        pool: true,
        conference: false,
    });
    config.infrastructure = InfrastructureOptions {
        water_harvesting: true,
        septic_system: true,
        solar_system: true,
    };
    config.land_type = LandType::Leasehold;

    let results = EstimationEngine::new()
        .estimate(&config, region)
        .expect("valid");

    // 7500 premium x 1.9 location x 1.65 category x 1.23 facilities
    let core_rate = 7500.0 * 1.9 * 1.65 * 1.23;
    approx(results.core_rate, core_rate, 1e-6);
    approx(results.infra_cost, 21_500.0 * 1.9, 1e-6);
    approx(results.land_legal_estimate, 3500.0, 1e-9);
    assert_eq!(results.currency, "NZD");
    assert_eq!(results.fee_percentage, Some(7.0));
}

#[test]
fn identical_inputs_yield_identical_outputs() {
    let rates = RegionalRates::pacific_defaults();
    let engine = EstimationEngine::new();

    for (country, region) in rates.iter() {
        for category in ProjectCategory::ordered() {
            let config = ProjectConfiguration::seeded(country, category, region);
            let first = engine.estimate(&config, region).expect("valid");
            let second = engine.estimate(&config, region).expect("valid");
            assert_eq!(first, second, "{country} {category}");
            assert!(first.construction_cost > 0.0);
        }
    }
}
