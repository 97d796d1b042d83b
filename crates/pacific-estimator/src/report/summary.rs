use super::format::{format_amount, format_currency};
use super::views::{
    CostLine, EstimateReport, FeeLine, FinancingSummary, ProjectFact, RateSource, ReportHeadline,
};
use crate::estimation::{
    BaseRateSource, CalculationResults, FeeOption, ProjectCategory, ProjectConfiguration,
    RepaymentSchedule,
};
use crate::regions::RegionConfig;

impl EstimateReport {
    pub fn build(
        config: &ProjectConfiguration,
        region: &RegionConfig,
        results: &CalculationResults,
    ) -> Self {
        let currency = results.currency.as_str();
        let rate_source = if results.is_live {
            RateSource::Live
        } else {
            RateSource::Standard
        };

        let fee_basis = match (config.selected_fee_option, results.fee_percentage) {
            (FeeOption::Percentage, Some(percentage)) => {
                format!("{percentage}% of construction cost")
            }
            _ => format!("Fixed fee for {}", config.building_type.label()),
        };

        Self {
            title: format!("{} Preliminary Plan", config.country.label()),
            currency: currency.to_string(),
            building_code: region.building_code.clone(),
            rate_source,
            rate_source_label: rate_source.label(),
            last_sync: results
                .last_sync
                .map(|synced| synced.format("%Y-%m-%d %H:%M UTC").to_string()),
            headline: ReportHeadline {
                construction_cost: format_currency(currency, results.construction_cost),
                rate_per_m2: format!("{}/m²", format_currency(currency, results.rate_per_m2)),
                total_fee: format_currency(currency, results.total_fee),
                fee_option: config.selected_fee_option,
                fee_basis,
            },
            project: project_facts(config, region),
            cost_lines: cost_lines(results),
            fee_lines: results
                .stage_breakdown
                .iter()
                .map(|stage| FeeLine {
                    stage: stage.name,
                    percentage: stage.percentage,
                    amount: stage.amount,
                    display: format_currency(currency, stage.amount),
                })
                .collect(),
            financing: None,
            warnings: rate_warnings(config, results),
        }
    }

    /// Attaches a repayment summary for financing the construction cost.
    pub fn with_financing(mut self, schedule: &RepaymentSchedule) -> Self {
        self.financing = Some(FinancingSummary {
            interest_rate: schedule.terms.interest_rate,
            term_years: schedule.terms.term_years,
            monthly_repayment: format_currency(&self.currency, schedule.monthly_repayment),
            total_interest: format_currency(&self.currency, schedule.total_interest),
        });
        self
    }
}

fn rate_warnings(config: &ProjectConfiguration, results: &CalculationResults) -> Vec<String> {
    match results.rates.base_rate_source {
        BaseRateSource::Requested => Vec::new(),
        BaseRateSource::StandardFallback => vec![format!(
            "No {} base rate for this region; the Standard rate was applied",
            config.standard.label()
        )],
        BaseRateSource::Missing => vec![format!(
            "No base rate for this region; structural cost is priced at {} and the estimate covers land and legal costs only",
            format_currency(&results.currency, 0.0)
        )],
    }
}

fn project_facts(config: &ProjectConfiguration, region: &RegionConfig) -> Vec<ProjectFact> {
    let mut facts = vec![
        fact("Country", config.country.label()),
        fact("Category", config.category.label()),
        fact("Building type", config.building_type.label()),
        fact("Gross floor area", format!("{} m²", format_amount(config.floor_area))),
    ];

    if let Some(area) = config.area_per_unit() {
        let unit = match config.category {
            ProjectCategory::CommercialResort => "key",
            ProjectCategory::MultiUnit | ProjectCategory::Standalone => "unit",
        };
        facts.push(fact(
            "Area per unit",
            format!("{} m² per {unit}", format_amount(area)),
        ));
    }

    let location = if region.location_multiplier(&config.location).is_some() {
        config.location.clone()
    } else {
        "Unlisted (base multiplier applied)".to_string()
    };

    facts.push(fact("Construction standard", config.standard.label()));
    facts.push(fact("Location", location));
    facts.push(fact("Land tenure", config.land_type.label()));
    facts.push(fact(
        "Storeys",
        if config.double_storey {
            "Double storey"
        } else {
            "Single storey"
        },
    ));

    if config.category == ProjectCategory::CommercialResort {
        let facilities = config
            .shared_facilities
            .map(|shared| {
                enabled_labels(&[
                    (shared.restaurant, "Restaurant"),
                    (shared.pool, "Pool"),
                    (shared.conference, "Conference"),
                ])
            })
            .unwrap_or_else(|| "None".to_string());
        facts.push(fact("Shared facilities", facilities));
    }

    let infrastructure = &config.infrastructure;
    facts.push(fact(
        "Off-grid infrastructure",
        enabled_labels(&[
            (infrastructure.water_harvesting, "Water harvesting"),
            (infrastructure.septic_system, "Septic system"),
            (infrastructure.solar_system, "Solar system"),
        ]),
    ));
    facts.push(fact(
        "Resilience",
        if config.enhanced_resilience {
            "Enhanced cyclone and seismic resilience"
        } else {
            "Code minimum"
        },
    ));

    facts
}

fn cost_lines(results: &CalculationResults) -> Vec<CostLine> {
    [
        ("Base structural cost", results.base_structural_cost, true),
        ("Resilience premium", results.resilience_premium, false),
        ("Off-grid infrastructure", results.infra_cost, false),
        ("Land, legal and survey", results.land_legal_estimate, true),
        ("Contingency (7%)", results.contingency, true),
        ("Total construction cost", results.construction_cost, true),
    ]
    .into_iter()
    .filter(|(_, amount, always)| *always || *amount > 0.0)
    .map(|(label, amount, _)| CostLine {
        label,
        amount,
        display: format_currency(&results.currency, amount),
        share_pct: if results.construction_cost > 0.0 {
            amount / results.construction_cost * 100.0
        } else {
            0.0
        },
    })
    .collect()
}

fn enabled_labels(options: &[(bool, &str)]) -> String {
    let enabled: Vec<&str> = options
        .iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, label)| *label)
        .collect();

    if enabled.is_empty() {
        "None".to_string()
    } else {
        enabled.join(", ")
    }
}

fn fact(label: &'static str, value: impl Into<String>) -> ProjectFact {
    ProjectFact {
        label,
        value: value.into(),
    }
}

#[cfg(test)]
mod tests {
    use crate::estimation::{
        repayment_schedule, BuildingType, ConstructionStandard, CountryKey, EstimationEngine,
        LoanTerms, ProjectCategory, ProjectConfiguration, SharedFacilities,
    };
    use crate::regions::RegionalRates;
    use crate::report::{EstimateReport, RateSource};

    #[test]
    fn report_lists_only_nonzero_optional_costs() {
        let rates = RegionalRates::pacific_defaults();
        let region = rates.region(CountryKey::Fiji).expect("fiji");
        let config = ProjectConfiguration::seeded(CountryKey::Fiji, ProjectCategory::Standalone, region);
        let results = EstimationEngine::new()
            .estimate(&config, region)
            .expect("valid configuration");

        let report = EstimateReport::build(&config, region, &results);

        assert_eq!(report.title, "Fiji Preliminary Plan");
        assert_eq!(report.rate_source, RateSource::Standard);
        assert_eq!(report.headline.construction_cost, "FJD 480,965");
        assert_eq!(report.headline.fee_basis, "10% of construction cost");
        let labels: Vec<&str> = report.cost_lines.iter().map(|line| line.label).collect();
        assert_eq!(
            labels,
            vec![
                "Base structural cost",
                "Land, legal and survey",
                "Contingency (7%)",
                "Total construction cost",
            ]
        );
        let total = report.cost_lines.last().expect("total line");
        assert!((total.share_pct - 100.0).abs() < 1e-9);
        assert_eq!(report.fee_lines.len(), 5);
        assert!(report.financing.is_none());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn report_carries_monthly_repayment() {
        let rates = RegionalRates::pacific_defaults();
        let region = rates.region(CountryKey::Fiji).expect("fiji");
        let config = ProjectConfiguration::seeded(CountryKey::Fiji, ProjectCategory::Standalone, region);
        let results = EstimationEngine::new()
            .estimate(&config, region)
            .expect("valid configuration");
        let schedule = repayment_schedule(results.construction_cost, &LoanTerms::default())
            .expect("default terms are valid");

        let report = EstimateReport::build(&config, region, &results).with_financing(&schedule);

        let financing = report.financing.expect("financing attached");
        assert_eq!(financing.interest_rate, 6.5);
        assert_eq!(financing.term_years, 25);
        assert_eq!(financing.monthly_repayment, "FJD 3,248");
    }

    #[test]
    fn report_warns_when_base_rate_is_missing() {
        let rates = RegionalRates::pacific_defaults();
        let mut region = rates.region(CountryKey::Tonga).expect("tonga").clone();
        region.base_rates.clear();
        let config = ProjectConfiguration::seeded(CountryKey::Tonga, ProjectCategory::Standalone, &region);
        let results = EstimationEngine::new()
            .estimate(&config, &region)
            .expect("missing rates never fail");

        let report = EstimateReport::build(&config, &region, &results);

        assert_eq!(results.base_structural_cost, 0.0);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("land and legal costs only"));
    }

    #[test]
    fn report_notes_standard_rate_fallback() {
        let rates = RegionalRates::pacific_defaults();
        let mut region = rates.region(CountryKey::Samoa).expect("samoa").clone();
        region.base_rates.remove(&ConstructionStandard::HighEnd);
        let mut config =
            ProjectConfiguration::seeded(CountryKey::Samoa, ProjectCategory::Standalone, &region);
        config.standard = ConstructionStandard::HighEnd;
        let results = EstimationEngine::new()
            .estimate(&config, &region)
            .expect("valid configuration");

        let report = EstimateReport::build(&config, &region, &results);

        assert_eq!(
            report.warnings,
            vec!["No High End base rate for this region; the Standard rate was applied".to_string()]
        );
    }

    #[test]
    fn resort_report_mentions_keys_and_facilities() {
        let rates = RegionalRates::pacific_defaults();
        let region = rates.region(CountryKey::Vanuatu).expect("vanuatu");
        let mut config =
            ProjectConfiguration::seeded(CountryKey::Vanuatu, ProjectCategory::CommercialResort, region)
                .with_building_type(BuildingType::ResortComplex);
        config.shared_facilities = Some(SharedFacilities {
            restaurant: true,
            pool: true,
            conference: false,
        });
        let results = EstimationEngine::new()
            .estimate(&config, region)
            .expect("valid configuration");

        let report = EstimateReport::build(&config, region, &results);

        let value_of = |label: &str| {
            report
                .project
                .iter()
                .find(|fact| fact.label == label)
                .map(|fact| fact.value.clone())
        };
        assert_eq!(value_of("Area per unit").as_deref(), Some("250 m² per key"));
        assert_eq!(value_of("Shared facilities").as_deref(), Some("Restaurant, Pool"));
        assert_eq!(report.building_code, "Vanuatu National Building Code");
    }
}
