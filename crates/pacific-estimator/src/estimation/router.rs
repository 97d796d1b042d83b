use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::domain::{CountryKey, ProjectConfiguration};
use super::financing::{repayment_schedule, LoanTerms, RepaymentSchedule};
use super::results::{CalculationResults, FeeComparison};
use super::{EstimateError, EstimationEngine};
use crate::error::AppError;
use crate::regions::{RegionConfig, RegionalRates};
use crate::report::EstimateReport;

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(flatten)]
    pub configuration: ProjectConfiguration,
    #[serde(default)]
    pub include_report: bool,
    /// Loan terms for the repayment figure; 6.5% over 25 years when omitted.
    #[serde(default)]
    pub financing: Option<LoanTerms>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub configuration: ProjectConfiguration,
    pub results: CalculationResults,
    pub financing: RepaymentSchedule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<EstimateReport>,
}

#[derive(Debug, Serialize)]
pub struct RegionView {
    pub country: CountryKey,
    pub country_label: &'static str,
    #[serde(flatten)]
    pub region: RegionConfig,
}

/// Router exposing estimation and rate-table lookups over a fixed rate book.
pub fn estimation_router(rates: Arc<RegionalRates>) -> Router {
    Router::new()
        .route("/api/v1/estimates", post(estimate_handler))
        .route("/api/v1/estimates/fee-options", post(fee_options_handler))
        .route("/api/v1/regions", get(list_regions_handler))
        .route("/api/v1/regions/:country", get(region_handler))
        .with_state(rates)
}

pub(crate) async fn estimate_handler(
    State(rates): State<Arc<RegionalRates>>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, AppError> {
    let EstimateRequest {
        configuration,
        include_report,
        financing,
    } = request;

    let region = region_for(&rates, configuration.country)?;
    let results = EstimationEngine::new().estimate(&configuration, region)?;
    let financing = repayment_schedule(results.construction_cost, &financing.unwrap_or_default())
        .map_err(EstimateError::from)?;
    let report = include_report.then(|| {
        EstimateReport::build(&configuration, region, &results).with_financing(&financing)
    });

    Ok(Json(EstimateResponse {
        configuration,
        results,
        financing,
        report,
    }))
}

pub(crate) async fn fee_options_handler(
    State(rates): State<Arc<RegionalRates>>,
    Json(configuration): Json<ProjectConfiguration>,
) -> Result<Json<FeeComparison>, AppError> {
    let region = region_for(&rates, configuration.country)?;
    let comparison = EstimationEngine::new().compare_fee_options(&configuration, region)?;
    Ok(Json(comparison))
}

pub(crate) async fn list_regions_handler(
    State(rates): State<Arc<RegionalRates>>,
) -> Json<Vec<RegionView>> {
    let regions = rates
        .iter()
        .map(|(country, region)| RegionView {
            country,
            country_label: country.label(),
            region: region.clone(),
        })
        .collect();
    Json(regions)
}

pub(crate) async fn region_handler(
    State(rates): State<Arc<RegionalRates>>,
    Path(country): Path<String>,
) -> Result<Json<RegionView>, AppError> {
    let country = country
        .parse::<CountryKey>()
        .map_err(EstimateError::InvalidConfiguration)?;
    let region = region_for(&rates, country)?;

    Ok(Json(RegionView {
        country,
        country_label: country.label(),
        region: region.clone(),
    }))
}

fn region_for(rates: &RegionalRates, country: CountryKey) -> Result<&RegionConfig, EstimateError> {
    rates
        .region(country)
        .ok_or(EstimateError::RegionUnavailable(country))
}
