use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use pacific_estimator::config::RatesConfig;
use pacific_estimator::error::AppError;
use pacific_estimator::estimation::ConfigurationError;
use pacific_estimator::regions::{RateSheetImporter, RegionalRates};
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the rate book: seeded Pacific defaults, with the configured rate
/// sheet applied on top when one is set.
pub(crate) fn load_rate_book(config: &RatesConfig) -> Result<RegionalRates, AppError> {
    let defaults = RegionalRates::pacific_defaults();

    let Some(path) = config.overrides_path.as_ref() else {
        return Ok(defaults);
    };

    let overrides = RateSheetImporter::from_path(path)?;
    info!(
        path = %path.display(),
        overrides = overrides.len(),
        "applied regional rate sheet"
    );
    Ok(defaults.with_overrides(&overrides, Utc::now()))
}

pub(crate) fn parse_choice<T>(raw: &str) -> Result<T, String>
where
    T: FromStr<Err = ConfigurationError>,
{
    T::from_str(raw).map_err(|err| err.to_string())
}
