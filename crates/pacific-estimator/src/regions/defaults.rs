use super::RegionConfig;
use crate::estimation::{ConstructionStandard, CountryKey};
use std::collections::{BTreeMap, HashMap};

struct RegionSeed {
    country: CountryKey,
    currency: &'static str,
    building_code: &'static str,
    locations: &'static [(&'static str, f64)],
    /// Basic, Standard, High End, Premium, Luxury.
    base_rates: [f64; 5],
}

const PACIFIC_REGIONS: [RegionSeed; 7] = [
    RegionSeed {
        country: CountryKey::Fiji,
        currency: "FJD",
        building_code: "Fiji National Building Code 2024",
        locations: &[
            ("Viti Levu Urban", 1.0),
            ("Viti Levu Rural", 1.1),
            ("Vanua Levu", 1.25),
            ("Outer Islands", 1.5),
        ],
        base_rates: [1800.0, 2800.0, 4500.0, 5500.0, 7500.0],
    },
    RegionSeed {
        country: CountryKey::Vanuatu,
        currency: "VUV",
        building_code: "Vanuatu National Building Code",
        locations: &[
            ("Efate (Port Vila)", 1.0),
            ("Espiritu Santo", 1.2),
            ("Tanna / Malekula", 1.4),
            ("Remote Torba/Tafea", 1.7),
        ],
        base_rates: [95000.0, 155000.0, 240000.0, 290000.0, 380000.0],
    },
    RegionSeed {
        country: CountryKey::Samoa,
        currency: "WST",
        building_code: "Samoa National Building Code",
        locations: &[("Upolu (Apia)", 1.0), ("Upolu Rural", 1.15), ("Savaii", 1.35)],
        base_rates: [2200.0, 3400.0, 5200.0, 6200.0, 8500.0],
    },
    RegionSeed {
        country: CountryKey::SolomonIslands,
        currency: "SBD",
        building_code: "Solomon Islands Building Code",
        locations: &[
            ("Honiara", 1.0),
            ("Guadalcanal Rural", 1.2),
            ("Western Province", 1.4),
            ("Remote Islands", 1.8),
        ],
        base_rates: [6500.0, 9800.0, 16000.0, 19500.0, 25000.0],
    },
    RegionSeed {
        country: CountryKey::PapuaNewGuinea,
        currency: "PGK",
        building_code: "PNG Building Board Regulations",
        locations: &[
            ("Port Moresby", 1.0),
            ("Lae / Mt Hagen", 1.15),
            ("Highlands Rural", 1.45),
            ("Island Regions", 1.6),
        ],
        base_rates: [2800.0, 4500.0, 7500.0, 9200.0, 12000.0],
    },
    RegionSeed {
        country: CountryKey::Tonga,
        currency: "TOP",
        building_code: "National Building Code of Tonga (AS/NZS)",
        locations: &[
            ("Tongatapu (Nukuʻalofa)", 1.0),
            ("Tongatapu Rural", 1.1),
            ("Vavaʻu Group", 1.3),
            ("Haʻapai / ʻEua", 1.45),
        ],
        base_rates: [2100.0, 3200.0, 4900.0, 6000.0, 7800.0],
    },
    RegionSeed {
        country: CountryKey::CookIslands,
        currency: "NZD",
        building_code: "Cook Islands Building Code (AS/NZS Compliance)",
        locations: &[
            ("Rarotonga", 1.0),
            ("Aitutaki", 1.25),
            ("Southern Group", 1.5),
            ("Northern Group", 1.9),
        ],
        base_rates: [2400.0, 3800.0, 6200.0, 7500.0, 9800.0],
    },
];

pub(super) fn pacific_regions() -> HashMap<CountryKey, RegionConfig> {
    PACIFIC_REGIONS
        .iter()
        .map(|seed| (seed.country, seed.to_config()))
        .collect()
}

impl RegionSeed {
    fn to_config(&self) -> RegionConfig {
        let locations = self
            .locations
            .iter()
            .map(|(name, multiplier)| (name.to_string(), *multiplier))
            .collect();

        let base_rates: BTreeMap<ConstructionStandard, f64> = ConstructionStandard::ordered()
            .into_iter()
            .zip(self.base_rates)
            .collect();

        RegionConfig {
            currency: self.currency.to_string(),
            building_code: self.building_code.to_string(),
            locations,
            base_rates,
            is_live: false,
            last_sync: None,
        }
    }
}
