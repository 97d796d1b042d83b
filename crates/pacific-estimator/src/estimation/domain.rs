use crate::regions::RegionConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryKey {
    Fiji,
    Vanuatu,
    Samoa,
    SolomonIslands,
    PapuaNewGuinea,
    Tonga,
    CookIslands,
}

impl CountryKey {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Fiji,
            Self::Vanuatu,
            Self::Samoa,
            Self::SolomonIslands,
            Self::PapuaNewGuinea,
            Self::Tonga,
            Self::CookIslands,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Fiji => "fiji",
            Self::Vanuatu => "vanuatu",
            Self::Samoa => "samoa",
            Self::SolomonIslands => "solomon_islands",
            Self::PapuaNewGuinea => "papua_new_guinea",
            Self::Tonga => "tonga",
            Self::CookIslands => "cook_islands",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Fiji => "Fiji",
            Self::Vanuatu => "Vanuatu",
            Self::Samoa => "Samoa",
            Self::SolomonIslands => "Solomon Islands",
            Self::PapuaNewGuinea => "Papua New Guinea",
            Self::Tonga => "Tonga",
            Self::CookIslands => "Cook Islands",
        }
    }
}

/// Project density class. Drives the category multiplier and gates which
/// building types and construction standards may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Standalone,
    MultiUnit,
    CommercialResort,
}

impl ProjectCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Standalone, Self::MultiUnit, Self::CommercialResort]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Standalone => "standalone",
            Self::MultiUnit => "multi_unit",
            Self::CommercialResort => "commercial_resort",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Standalone => "Standalone Residential Dwellings",
            Self::MultiUnit => "Multi-Unit and Group Accommodation",
            Self::CommercialResort => "Commercial, Public & Resort",
        }
    }

    pub fn building_types(self) -> &'static [BuildingType] {
        match self {
            Self::Standalone => &[BuildingType::SingleDwelling, BuildingType::TownhouseDuplex],
            Self::MultiUnit => &[BuildingType::Apartments, BuildingType::HostelGuestHouse],
            Self::CommercialResort => &[
                BuildingType::CommercialFacility,
                BuildingType::PublicFacility,
                BuildingType::ResortComplex,
            ],
        }
    }

    pub fn allowed_standards(self) -> &'static [ConstructionStandard] {
        match self {
            Self::Standalone | Self::MultiUnit => &[
                ConstructionStandard::Basic,
                ConstructionStandard::Standard,
                ConstructionStandard::HighEnd,
            ],
            Self::CommercialResort => &[
                ConstructionStandard::Standard,
                ConstructionStandard::HighEnd,
                ConstructionStandard::Premium,
                ConstructionStandard::Luxury,
            ],
        }
    }

    pub fn allows_standard(self, standard: ConstructionStandard) -> bool {
        self.allowed_standards().contains(&standard)
    }

    pub const fn default_standard(self) -> ConstructionStandard {
        match self {
            Self::CommercialResort => ConstructionStandard::Premium,
            Self::Standalone | Self::MultiUnit => ConstructionStandard::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    SingleDwelling,
    TownhouseDuplex,
    Apartments,
    HostelGuestHouse,
    CommercialFacility,
    PublicFacility,
    ResortComplex,
}

impl BuildingType {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::SingleDwelling,
            Self::TownhouseDuplex,
            Self::Apartments,
            Self::HostelGuestHouse,
            Self::CommercialFacility,
            Self::PublicFacility,
            Self::ResortComplex,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::SingleDwelling => "single_dwelling",
            Self::TownhouseDuplex => "townhouse_duplex",
            Self::Apartments => "apartments",
            Self::HostelGuestHouse => "hostel_guest_house",
            Self::CommercialFacility => "commercial_facility",
            Self::PublicFacility => "public_facility",
            Self::ResortComplex => "resort_complex",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleDwelling => "Single Dwelling",
            Self::TownhouseDuplex => "Townhouse or Duplex",
            Self::Apartments => "Stacked Apartments",
            Self::HostelGuestHouse => "Hostel or Guest House",
            Self::CommercialFacility => "Shop, Restaurant or Bar",
            Self::PublicFacility => "Public or Health Facility",
            Self::ResortComplex => "Island Resort Complex",
        }
    }

    pub const fn category(self) -> ProjectCategory {
        match self {
            Self::SingleDwelling | Self::TownhouseDuplex => ProjectCategory::Standalone,
            Self::Apartments | Self::HostelGuestHouse => ProjectCategory::MultiUnit,
            Self::CommercialFacility | Self::PublicFacility | Self::ResortComplex => {
                ProjectCategory::CommercialResort
            }
        }
    }

    /// Gross floor area used to seed a new configuration, in m².
    pub const fn default_floor_area(self) -> f64 {
        match self {
            Self::SingleDwelling => 160.0,
            Self::TownhouseDuplex => 800.0,
            Self::Apartments => 1200.0,
            Self::HostelGuestHouse => 1000.0,
            Self::CommercialFacility => 2500.0,
            Self::PublicFacility => 3000.0,
            Self::ResortComplex => 5000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionStandard {
    Basic,
    Standard,
    HighEnd,
    Premium,
    Luxury,
}

impl ConstructionStandard {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Basic,
            Self::Standard,
            Self::HighEnd,
            Self::Premium,
            Self::Luxury,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::HighEnd => "high_end",
            Self::Premium => "premium",
            Self::Luxury => "luxury",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Standard => "Standard",
            Self::HighEnd => "High End",
            Self::Premium => "Premium",
            Self::Luxury => "Luxury",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandType {
    #[default]
    Freehold,
    Leasehold,
    Customary,
}

impl LandType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Freehold, Self::Leasehold, Self::Customary]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Freehold => "freehold",
            Self::Leasehold => "leasehold",
            Self::Customary => "customary",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Freehold => "Freehold",
            Self::Leasehold => "Leasehold",
            Self::Customary => "Customary Land",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeOption {
    #[default]
    Percentage,
    Fixed,
}

impl FeeOption {
    pub const fn ordered() -> [Self; 2] {
        [Self::Percentage, Self::Fixed]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Percentage => "Percentage Based",
            Self::Fixed => "Fixed Fee",
        }
    }
}

macro_rules! labelled_enum {
    ($($ty:ident => $kind:literal),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = ConfigurationError;

                fn from_str(raw: &str) -> Result<Self, Self::Err> {
                    let wanted = normalize_key(raw);
                    Self::ordered()
                        .into_iter()
                        .find(|variant| {
                            variant.key() == wanted || normalize_key(variant.label()) == wanted
                        })
                        .ok_or_else(|| ConfigurationError::UnknownVariant {
                            kind: $kind,
                            value: raw.trim().to_string(),
                        })
                }
            }
        )+
    };
}

labelled_enum!(
    CountryKey => "country",
    ProjectCategory => "category",
    BuildingType => "building type",
    ConstructionStandard => "construction standard",
    LandType => "land type",
    FeeOption => "fee option",
);

/// Lowercases and collapses every run of non-alphanumeric characters into a
/// single underscore, so "High End", "high-end" and "HIGH_END" compare equal.
pub fn normalize_key(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    let mut pending_separator = false;

    for ch in value.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            pending_separator = false;
            normalized.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    normalized
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedFacilities {
    pub restaurant: bool,
    pub pool: bool,
    pub conference: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfrastructureOptions {
    pub water_harvesting: bool,
    pub septic_system: bool,
    pub solar_system: bool,
}

/// Everything the estimator needs to know about a project. Immutable for the
/// duration of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfiguration {
    pub country: CountryKey,
    pub category: ProjectCategory,
    pub building_type: BuildingType,
    pub floor_area: f64,
    pub standard: ConstructionStandard,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub double_storey: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_facilities: Option<SharedFacilities>,
    #[serde(default)]
    pub infrastructure: InfrastructureOptions,
    #[serde(default)]
    pub land_type: LandType,
    #[serde(default)]
    pub enhanced_resilience: bool,
    #[serde(default)]
    pub selected_fee_option: FeeOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_keys: Option<u32>,
}

impl ProjectConfiguration {
    /// Starting point for a new project in `category`, mirroring the defaults
    /// a client sees before adjusting anything.
    pub fn seeded(country: CountryKey, category: ProjectCategory, region: &RegionConfig) -> Self {
        let building_type = category.building_types()[0];

        Self {
            country,
            category,
            building_type,
            floor_area: building_type.default_floor_area(),
            standard: category.default_standard(),
            location: region.primary_location().unwrap_or_default().to_string(),
            double_storey: false,
            shared_facilities: None,
            infrastructure: InfrastructureOptions::default(),
            land_type: LandType::Freehold,
            enhanced_resilience: false,
            selected_fee_option: FeeOption::Percentage,
            unit_count: (category == ProjectCategory::MultiUnit).then_some(4),
            room_keys: (category == ProjectCategory::CommercialResort).then_some(20),
        }
    }

    /// Swaps the building type and reseeds the floor area to that type's default.
    pub fn with_building_type(mut self, building_type: BuildingType) -> Self {
        self.building_type = building_type;
        self.floor_area = building_type.default_floor_area();
        self
    }

    /// Rejects structurally invalid input before any cost is computed.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.floor_area.is_finite() || self.floor_area <= 0.0 {
            return Err(ConfigurationError::InvalidFloorArea(self.floor_area));
        }

        if self.building_type.category() != self.category {
            return Err(ConfigurationError::BuildingTypeOutsideCategory {
                category: self.category,
                building_type: self.building_type,
            });
        }

        if !self.category.allows_standard(self.standard) {
            return Err(ConfigurationError::StandardOutsideCategory {
                category: self.category,
                standard: self.standard,
            });
        }

        if self.unit_count == Some(0) {
            return Err(ConfigurationError::ZeroCount { field: "unit_count" });
        }

        if self.room_keys == Some(0) {
            return Err(ConfigurationError::ZeroCount { field: "room_keys" });
        }

        Ok(())
    }

    /// Floor area per dwelling unit or hospitality key, whichever applies.
    pub fn area_per_unit(&self) -> Option<f64> {
        let divisor = match self.category {
            ProjectCategory::MultiUnit => self.unit_count,
            ProjectCategory::CommercialResort => self.room_keys,
            ProjectCategory::Standalone => None,
        }?;

        (divisor > 0).then(|| self.floor_area / f64::from(divisor))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("floor area must be a positive number of square metres (found {0})")]
    InvalidFloorArea(f64),
    #[error("{building_type} is not offered under the {category} category")]
    BuildingTypeOutsideCategory {
        category: ProjectCategory,
        building_type: BuildingType,
    },
    #[error("{standard} construction is not offered under the {category} category")]
    StandardOutsideCategory {
        category: ProjectCategory,
        standard: ConstructionStandard,
    },
    #[error("{field} must be at least 1 when provided")]
    ZeroCount { field: &'static str },
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_key_collapses_separators() {
        assert_eq!(normalize_key("  High End "), "high_end");
        assert_eq!(normalize_key("Shop, Restaurant or Bar"), "shop_restaurant_or_bar");
        assert_eq!(normalize_key("papua-new--guinea"), "papua_new_guinea");
        assert_eq!(normalize_key("Customary Land"), "customary_land");
    }

    #[test]
    fn enums_parse_from_keys_and_labels() {
        assert_eq!(
            "Solomon Islands".parse::<CountryKey>(),
            Ok(CountryKey::SolomonIslands)
        );
        assert_eq!(
            "high_end".parse::<ConstructionStandard>(),
            Ok(ConstructionStandard::HighEnd)
        );
        assert_eq!("Customary Land".parse::<LandType>(), Ok(LandType::Customary));
        assert_eq!("customary".parse::<LandType>(), Ok(LandType::Customary));
        assert_eq!("Fixed Fee".parse::<FeeOption>(), Ok(FeeOption::Fixed));
        assert_eq!(
            "multi-unit".parse::<ProjectCategory>(),
            Ok(ProjectCategory::MultiUnit)
        );
    }

    #[test]
    fn unknown_spelling_is_rejected_with_kind() {
        let err = "Atlantis".parse::<CountryKey>().expect_err("not a Pacific country");
        assert_eq!(
            err,
            ConfigurationError::UnknownVariant {
                kind: "country",
                value: "Atlantis".to_string(),
            }
        );
        assert_eq!(err.to_string(), "unknown country 'Atlantis'");
    }

    #[test]
    fn every_building_type_belongs_to_the_category_that_lists_it() {
        for category in ProjectCategory::ordered() {
            for building_type in category.building_types() {
                assert_eq!(building_type.category(), category);
            }
        }
    }

    #[test]
    fn default_standard_is_allowed_for_each_category() {
        for category in ProjectCategory::ordered() {
            assert!(category.allows_standard(category.default_standard()));
        }
    }
}
