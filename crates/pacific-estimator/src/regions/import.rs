use crate::estimation::{normalize_key, ConstructionStandard, CountryKey};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Single correction to a region's rate table.
#[derive(Debug, Clone, PartialEq)]
pub struct RateOverride {
    pub country: CountryKey,
    pub field: RateOverrideField,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RateOverrideField {
    BaseRate {
        standard: ConstructionStandard,
        rate: f64,
    },
    Location {
        name: String,
        multiplier: f64,
    },
    Currency(String),
    BuildingCode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RateImportError {
    #[error("failed to read rate sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rate sheet CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("rate sheet line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
}

/// Reads rate sheets with the columns `Country,Field,Key,Value`.
///
/// `Field` is one of `base_rate` (key = construction standard), `location`
/// (key = location name, value = multiplier), `currency` or `building_code`
/// (value only).
pub struct RateSheetImporter;

impl RateSheetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RateOverride>, RateImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RateOverride>, RateImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut overrides = Vec::new();

        for (index, record) in csv_reader.deserialize::<RateRow>().enumerate() {
            let row = record?;
            // header occupies line 1
            let line = index + 2;
            overrides.push(row.into_override(line)?);
        }

        debug!(count = overrides.len(), "parsed rate sheet");
        Ok(overrides)
    }
}

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Field")]
    field: String,
    #[serde(rename = "Key", default, deserialize_with = "empty_string_as_none")]
    key: Option<String>,
    #[serde(rename = "Value")]
    value: String,
}

impl RateRow {
    fn into_override(self, line: usize) -> Result<RateOverride, RateImportError> {
        let invalid = |reason: String| RateImportError::InvalidRow { line, reason };

        let country = self
            .country
            .parse::<CountryKey>()
            .map_err(|err| invalid(err.to_string()))?;

        let field = match normalize_key(&self.field).as_str() {
            "base_rate" | "rate" => {
                let key = self
                    .key
                    .ok_or_else(|| invalid("base_rate rows need a construction standard key".into()))?;
                let standard = key
                    .parse::<ConstructionStandard>()
                    .map_err(|err| invalid(err.to_string()))?;
                let rate = parse_amount(&self.value).map_err(invalid)?;
                if rate <= 0.0 {
                    return Err(invalid(format!("base rate must be positive (found {rate})")));
                }
                RateOverrideField::BaseRate { standard, rate }
            }
            "location" => {
                let name = self
                    .key
                    .ok_or_else(|| invalid("location rows need a location name key".into()))?;
                let multiplier = parse_amount(&self.value).map_err(invalid)?;
                if multiplier < 1.0 {
                    return Err(invalid(format!(
                        "location multiplier must be at least 1.0 (found {multiplier})"
                    )));
                }
                RateOverrideField::Location { name, multiplier }
            }
            "currency" => RateOverrideField::Currency(
                non_empty(&self.value)
                    .map(|code| code.to_ascii_uppercase())
                    .ok_or_else(|| invalid("currency code is empty".into()))?,
            ),
            "building_code" => RateOverrideField::BuildingCode(
                non_empty(&self.value)
                    .map(str::to_string)
                    .ok_or_else(|| invalid("building code is empty".into()))?,
            ),
            _ => return Err(invalid(format!("unknown field '{}'", self.field))),
        };

        Ok(RateOverride { country, field })
    }
}

fn parse_amount(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw.chars().filter(|ch| *ch != ',' && *ch != '_').collect();
    match cleaned.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("'{raw}' is not a number")),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
