use crate::infra::{load_rate_book, parse_choice};
use clap::Args;
use pacific_estimator::config::{AppConfig, RatesConfig};
use pacific_estimator::error::AppError;
use pacific_estimator::estimation::{
    repayment_schedule, BuildingType, CalculationResults, ConstructionStandard, CountryKey,
    EstimateError, EstimationEngine, FeeComparison, FeeOption, LandType, LoanTerms,
    ProjectCategory, ProjectConfiguration, RepaymentSchedule, SharedFacilities,
    DEFAULT_INTEREST_RATE, DEFAULT_LOAN_TERM_YEARS,
};
use pacific_estimator::regions::{RegionConfig, RegionalRates};
use pacific_estimator::report::{format_amount, format_currency, EstimateReport};
use pacific_estimator::telemetry::{self, LogSink};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Country whose rate table prices the project
    #[arg(long, value_parser = parse_choice::<CountryKey>)]
    pub(crate) country: CountryKey,
    /// Project category (standalone, multi-unit, commercial-resort)
    #[arg(long, value_parser = parse_choice::<ProjectCategory>, default_value = "standalone")]
    pub(crate) category: ProjectCategory,
    /// Building type. Defaults to the first type offered by the category.
    #[arg(long, value_parser = parse_choice::<BuildingType>)]
    pub(crate) building_type: Option<BuildingType>,
    /// Gross floor area in square metres. Defaults to the building type's typical area.
    #[arg(long)]
    pub(crate) floor_area: Option<f64>,
    /// Construction standard. Defaults to the category's default standard.
    #[arg(long, value_parser = parse_choice::<ConstructionStandard>)]
    pub(crate) standard: Option<ConstructionStandard>,
    /// Named location within the country. Defaults to the primary location.
    #[arg(long)]
    pub(crate) location: Option<String>,
    #[arg(long, value_parser = parse_choice::<LandType>, default_value = "freehold")]
    pub(crate) land_type: LandType,
    #[arg(long, value_parser = parse_choice::<FeeOption>, default_value = "percentage")]
    pub(crate) fee_option: FeeOption,
    #[arg(long)]
    pub(crate) double_storey: bool,
    /// Cyclone and seismic resilience upgrade
    #[arg(long)]
    pub(crate) enhanced_resilience: bool,
    #[arg(long)]
    pub(crate) restaurant: bool,
    #[arg(long)]
    pub(crate) pool: bool,
    #[arg(long)]
    pub(crate) conference: bool,
    #[arg(long)]
    pub(crate) water_harvesting: bool,
    #[arg(long)]
    pub(crate) septic_system: bool,
    #[arg(long)]
    pub(crate) solar_system: bool,
    /// Dwelling count for multi-unit projects
    #[arg(long)]
    pub(crate) unit_count: Option<u32>,
    /// Room keys for commercial and resort projects
    #[arg(long)]
    pub(crate) room_keys: Option<u32>,
    /// Price both fee structures against the same construction cost
    #[arg(long)]
    pub(crate) compare_fees: bool,
    /// Annual interest rate, in percent, for the monthly repayment figure
    #[arg(long, default_value_t = DEFAULT_INTEREST_RATE)]
    pub(crate) interest_rate: f64,
    /// Loan term in years for the monthly repayment figure
    #[arg(long, default_value_t = DEFAULT_LOAN_TERM_YEARS)]
    pub(crate) loan_term: u32,
    /// Emit JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
    /// Rate sheet CSV applied over the seeded regional rates
    #[arg(long)]
    pub(crate) rates_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RegionsArgs {
    /// Show a single country instead of the full rate book
    #[arg(long, value_parser = parse_choice::<CountryKey>)]
    pub(crate) country: Option<CountryKey>,
    #[arg(long)]
    pub(crate) json: bool,
    #[arg(long)]
    pub(crate) rates_csv: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EstimateOutput<'a> {
    configuration: &'a ProjectConfiguration,
    results: &'a CalculationResults,
    report: &'a EstimateReport,
    financing: &'a RepaymentSchedule,
    #[serde(skip_serializing_if = "Option::is_none")]
    fee_options: Option<&'a FeeComparison>,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let rates = prepare(args.rates_csv.clone())?;
    let region = rates
        .region(args.country)
        .ok_or(EstimateError::RegionUnavailable(args.country))?;

    let json = args.json;
    let compare_fees = args.compare_fees;
    let terms = LoanTerms {
        interest_rate: args.interest_rate,
        term_years: args.loan_term,
    };
    let config = build_configuration(args, region);

    let engine = EstimationEngine::new();
    let results = engine.estimate(&config, region)?;
    let comparison = if compare_fees {
        Some(engine.compare_fee_options(&config, region)?)
    } else {
        None
    };
    let financing = repayment_schedule(results.construction_cost, &terms)
        .map_err(EstimateError::from)?;
    let report = EstimateReport::build(&config, region, &results).with_financing(&financing);

    if json {
        let output = EstimateOutput {
            configuration: &config,
            results: &results,
            report: &report,
            financing: &financing,
            fee_options: comparison.as_ref(),
        };
        print_json(&output)?;
    } else {
        let text = render_report(&report, comparison.as_ref()).map_err(std::io::Error::other)?;
        print!("{text}");
    }

    Ok(())
}

pub(crate) fn run_regions(args: RegionsArgs) -> Result<(), AppError> {
    let rates = prepare(args.rates_csv)?;

    let selected: Vec<(CountryKey, &RegionConfig)> = match args.country {
        Some(country) => {
            let region = rates
                .region(country)
                .ok_or(EstimateError::RegionUnavailable(country))?;
            vec![(country, region)]
        }
        None => rates.iter().collect(),
    };

    if args.json {
        let listing: Vec<_> = selected
            .iter()
            .map(|(country, region)| serde_json::json!({ "country": country, "region": region }))
            .collect();
        print_json(&listing)?;
    } else {
        for (country, region) in selected {
            let text = render_region(country, region).map_err(std::io::Error::other)?;
            print!("{text}");
        }
    }

    Ok(())
}

fn prepare(rates_csv: Option<PathBuf>) -> Result<RegionalRates, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;

    let rates_config = match rates_csv {
        Some(path) => RatesConfig {
            overrides_path: Some(path),
        },
        None => config.rates,
    };
    load_rate_book(&rates_config)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, value).map_err(std::io::Error::from)?;
    std::io::Write::write_all(&mut handle, b"\n")?;
    Ok(())
}

pub(crate) fn build_configuration(args: EstimateArgs, region: &RegionConfig) -> ProjectConfiguration {
    let mut config = ProjectConfiguration::seeded(args.country, args.category, region);

    if let Some(building_type) = args.building_type {
        config = config.with_building_type(building_type);
    }
    if let Some(floor_area) = args.floor_area {
        config.floor_area = floor_area;
    }
    if let Some(standard) = args.standard {
        config.standard = standard;
    }
    if let Some(location) = args.location {
        config.location = location;
    }
    if let Some(unit_count) = args.unit_count {
        config.unit_count = Some(unit_count);
    }
    if let Some(room_keys) = args.room_keys {
        config.room_keys = Some(room_keys);
    }
    if args.restaurant || args.pool || args.conference {
        config.shared_facilities = Some(SharedFacilities {
            restaurant: args.restaurant,
            pool: args.pool,
            conference: args.conference,
        });
    }

    config.land_type = args.land_type;
    config.selected_fee_option = args.fee_option;
    config.double_storey = args.double_storey;
    config.enhanced_resilience = args.enhanced_resilience;
    config.infrastructure.water_harvesting = args.water_harvesting;
    config.infrastructure.septic_system = args.septic_system;
    config.infrastructure.solar_system = args.solar_system;
    config
}

pub(crate) fn render_report(
    report: &EstimateReport,
    comparison: Option<&FeeComparison>,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", report.title)?;
    writeln!(out, "Building code: {}", report.building_code)?;
    match &report.last_sync {
        Some(synced) => writeln!(out, "Rates: {} (synced {synced})", report.rate_source_label)?,
        None => writeln!(out, "Rates: {}", report.rate_source_label)?,
    }
    for warning in &report.warnings {
        writeln!(out, "Warning: {warning}")?;
    }

    writeln!(out, "\nProject")?;
    for fact in &report.project {
        writeln!(out, "  {:<20} {}", fact.label, fact.value)?;
    }

    writeln!(out, "\nConstruction cost")?;
    for line in &report.cost_lines {
        writeln!(
            out,
            "  {:<28} {:>20} {:>6.1}%",
            line.label, line.display, line.share_pct
        )?;
    }
    writeln!(out, "  Rate per m²: {}", report.headline.rate_per_m2)?;

    writeln!(
        out,
        "\nProfessional fee: {} ({})",
        report.headline.total_fee, report.headline.fee_basis
    )?;
    for line in &report.fee_lines {
        writeln!(
            out,
            "  {:<28} {:>5.0}% {:>20}",
            line.stage, line.percentage, line.display
        )?;
    }

    if let Some(comparison) = comparison {
        writeln!(out, "\nFee options")?;
        for proposal in [&comparison.percentage, &comparison.fixed] {
            writeln!(
                out,
                "  {:<28} {:>20}",
                proposal.option.label(),
                format_currency(&comparison.currency, proposal.total_fee)
            )?;
        }
        writeln!(out, "  Lower fee: {}", comparison.lower().option.label())?;
    }

    if let Some(financing) = &report.financing {
        writeln!(
            out,
            "\nFinancing ({}% over {} years)",
            financing.interest_rate, financing.term_years
        )?;
        writeln!(out, "  {:<28} {:>20}", "Monthly repayment", financing.monthly_repayment)?;
        writeln!(out, "  {:<28} {:>20}", "Total interest", financing.total_interest)?;
    }

    Ok(out)
}

pub(crate) fn render_region(
    country: CountryKey,
    region: &RegionConfig,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let source = if region.is_live { "live" } else { "standard" };
    writeln!(
        out,
        "{} ({}, {source} rates)",
        country.label(),
        region.currency
    )?;
    writeln!(out, "  Building code: {}", region.building_code)?;
    writeln!(out, "  Base rates per m²:")?;
    for (standard, rate) in &region.base_rates {
        writeln!(out, "    {:<10} {:>12}", standard.label(), format_amount(*rate))?;
    }
    writeln!(out, "  Locations:")?;
    for (name, multiplier) in &region.locations {
        writeln!(out, "    {name:<24} x{multiplier:.2}")?;
    }
    Ok(out)
}
