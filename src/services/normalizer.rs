//! Provider record -> canonical `EconomicEvent` mapping.
//!
//! All heuristics live in explicit rule tables so each one can be unit
//! tested and swapped without touching control flow.

use crate::models::{
    ConsensusIntelligence, EconomicEvent, EventCategory, HistoricalStats, Impact, Region,
    TradingSetup,
};
use crate::services::provider::ProviderRecord;
use crate::utils::slug;
use chrono::{DateTime, Utc};

/// Exact-match country -> region rule.
pub struct RegionRule {
    pub countries: &'static [&'static str],
    pub region: Region,
}

pub const REGION_RULES: &[RegionRule] = &[
    RegionRule {
        countries: &["United States", "US", "USA"],
        region: Region::Us,
    },
    RegionRule {
        countries: &[
            "Germany", "France", "Italy", "Spain", "Euro Area", "Eurozone", "EU", "DE", "FR",
        ],
        region: Region::Eu,
    },
    RegionRule {
        countries: &["United Kingdom", "UK", "GB"],
        region: Region::Uk,
    },
    RegionRule {
        countries: &[
            "Japan",
            "China",
            "Australia",
            "South Korea",
            "India",
            "JP",
            "CN",
            "AU",
        ],
        region: Region::Asia,
    },
];

/// Ordered keyword -> category rule; first match wins.
pub struct CategoryRule {
    pub keywords: &'static [&'static str],
    pub category: EventCategory,
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["cpi", "inflation", "price index"],
        category: EventCategory::Inflation,
    },
    CategoryRule {
        keywords: &["employment", "job", "payroll", "unemployment"],
        category: EventCategory::Employment,
    },
    CategoryRule {
        keywords: &["gdp", "growth"],
        category: EventCategory::Gdp,
    },
    CategoryRule {
        keywords: &["rate", "meeting", "fomc", "bank"],
        category: EventCategory::CentralBank,
    },
    CategoryRule {
        keywords: &["trade", "export", "import", "balance"],
        category: EventCategory::Trade,
    },
    CategoryRule {
        keywords: &["retail", "consumption"],
        category: EventCategory::Retail,
    },
    CategoryRule {
        keywords: &["pmi", "manufacturing", "industrial"],
        category: EventCategory::Manufacturing,
    },
    CategoryRule {
        keywords: &["housing", "home"],
        category: EventCategory::Housing,
    },
];

/// Placeholder bucket for event names no rule matches. Not semantically
/// meaningful; callers must not treat it as a real classification.
pub const DEFAULT_CATEGORY: EventCategory = EventCategory::Trade;

/// Representative instruments per region.
pub struct AssetRule {
    pub region: Region,
    pub assets: &'static [&'static str],
}

pub const REGION_ASSETS: &[AssetRule] = &[
    AssetRule {
        region: Region::Us,
        assets: &["EUR/USD", "USD/JPY", "SPY", "Gold"],
    },
    AssetRule {
        region: Region::Eu,
        assets: &["EUR/USD", "EUR/GBP", "DAX"],
    },
    AssetRule {
        region: Region::Uk,
        assets: &["GBP/USD", "EUR/GBP", "FTSE"],
    },
    AssetRule {
        region: Region::Asia,
        assets: &["USD/JPY", "AUD/USD", "Nikkei"],
    },
    AssetRule {
        region: Region::Em,
        assets: &["USD/MXN", "EEM"],
    },
];

pub const MAX_AFFECTED_ASSETS: usize = 4;

/// Infer the region from the provider's country string. Unmapped countries
/// fall into the emerging-markets bucket.
pub fn infer_region(country: &str) -> Region {
    let country = country.trim();
    for rule in REGION_RULES {
        if rule
            .countries
            .iter()
            .any(|c| c.eq_ignore_ascii_case(country))
        {
            return rule.region;
        }
    }
    Region::Em
}

/// Infer the category from keywords in the event name; first rule wins.
pub fn infer_category(name: &str) -> EventCategory {
    let name = name.to_lowercase();
    for rule in CATEGORY_RULES {
        if rule.keywords.iter().any(|k| name.contains(k)) {
            return rule.category;
        }
    }
    DEFAULT_CATEGORY
}

/// Map the provider's impact string. Providers disagree on casing and some
/// send numeric levels; anything unrecognized is treated as low.
pub fn infer_impact(raw: &str) -> Impact {
    match raw.trim().to_lowercase().as_str() {
        "high" | "3" => Impact::High,
        "medium" | "moderate" | "2" => Impact::Medium,
        _ => Impact::Low,
    }
}

/// Representative instruments for the region, plus WTI when the event is
/// oil-related. Capped at `MAX_AFFECTED_ASSETS`.
pub fn infer_affected_assets(region: Region, name: &str) -> Vec<String> {
    let mut assets: Vec<String> = REGION_ASSETS
        .iter()
        .find(|rule| rule.region == region)
        .map(|rule| rule.assets.iter().map(|a| a.to_string()).collect())
        .unwrap_or_default();

    let name = name.to_lowercase();
    if (name.contains("oil") || name.contains("inventories")) && !assets.iter().any(|a| a == "WTI")
    {
        assets.insert(0, "WTI".to_string());
    }

    assets.truncate(MAX_AFFECTED_ASSETS);
    assets
}

/// Deterministic event id: the same provider record always normalizes to
/// the same id, so repeated ingestion cannot create duplicates.
pub fn event_id(name: &str, datetime: DateTime<Utc>, country: &str) -> String {
    format!("{}-{}-{}", slug(name), datetime.timestamp(), slug(country))
}

/// Pure mapping from a transport record to the canonical domain model.
/// Analytics payloads start at their defaults; the enrichment engine fills
/// them in.
pub fn normalize(record: &ProviderRecord) -> EconomicEvent {
    let region = infer_region(&record.country);

    EconomicEvent {
        id: event_id(&record.name, record.datetime, &record.country),
        name: record.name.clone(),
        country: record.country.clone(),
        region,
        datetime: record.datetime,
        impact: infer_impact(&record.impact),
        category: infer_category(&record.name),
        actual: record.actual,
        consensus: record.consensus.unwrap_or(0.0),
        previous: record.previous.unwrap_or(0.0),
        unit: record.unit.clone(),
        historical_stats: HistoricalStats::default(),
        consensus_intelligence: ConsensusIntelligence::default(),
        trading_setup: TradingSetup::default(),
        affected_assets: infer_affected_assets(region, &record.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> ProviderRecord {
        ProviderRecord {
            name: "Non-Farm Payrolls".to_string(),
            country: "United States".to_string(),
            datetime: Utc.with_ymd_and_hms(2026, 8, 7, 12, 30, 0).unwrap(),
            impact: "high".to_string(),
            actual: None,
            consensus: Some(180.0),
            previous: Some(175.0),
            unit: "K".to_string(),
        }
    }

    #[test]
    fn test_region_mapping() {
        assert_eq!(infer_region("United States"), Region::Us);
        assert_eq!(infer_region("US"), Region::Us);
        assert_eq!(infer_region("Germany"), Region::Eu);
        assert_eq!(infer_region("United Kingdom"), Region::Uk);
        assert_eq!(infer_region("Japan"), Region::Asia);
        // Unmapped countries default to emerging markets
        assert_eq!(infer_region("Brazil"), Region::Em);
        assert_eq!(infer_region(""), Region::Em);
    }

    #[test]
    fn test_category_first_match_wins() {
        assert_eq!(infer_category("CPI YoY"), EventCategory::Inflation);
        assert_eq!(infer_category("Non-Farm Payrolls"), EventCategory::Employment);
        assert_eq!(infer_category("GDP QoQ"), EventCategory::Gdp);
        // "Bank of England Rate Decision" contains both "bank"/"rate" and
        // "balance"-adjacent words; central bank rules come first
        assert_eq!(
            infer_category("Bank of England Rate Decision"),
            EventCategory::CentralBank
        );
        assert_eq!(infer_category("Trade Balance"), EventCategory::Trade);
        assert_eq!(infer_category("Retail Sales MoM"), EventCategory::Retail);
        assert_eq!(
            infer_category("Manufacturing PMI"),
            EventCategory::Manufacturing
        );
        assert_eq!(infer_category("Housing Starts"), EventCategory::Housing);
    }

    #[test]
    fn test_category_default_is_placeholder() {
        assert_eq!(infer_category("Mystery Indicator"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_impact_mapping() {
        assert_eq!(infer_impact("High"), Impact::High);
        assert_eq!(infer_impact("3"), Impact::High);
        assert_eq!(infer_impact("medium"), Impact::Medium);
        assert_eq!(infer_impact("low"), Impact::Low);
        assert_eq!(infer_impact(""), Impact::Low);
        assert_eq!(infer_impact("whatever"), Impact::Low);
    }

    #[test]
    fn test_affected_assets_capped() {
        let assets = infer_affected_assets(Region::Us, "CPI YoY");
        assert_eq!(assets, vec!["EUR/USD", "USD/JPY", "SPY", "Gold"]);
        assert!(assets.len() <= MAX_AFFECTED_ASSETS);
    }

    #[test]
    fn test_oil_keyword_adds_wti() {
        let assets = infer_affected_assets(Region::Us, "Crude Oil Inventories");
        assert_eq!(assets[0], "WTI");
        assert_eq!(assets.len(), MAX_AFFECTED_ASSETS);
    }

    #[test]
    fn test_id_is_idempotent() {
        let record = sample_record();
        let first = normalize(&record);
        let second = normalize(&record);
        assert_eq!(first.id, second.id);
        assert_eq!(first.id, "non-farm-payrolls-1786105800-united-states");
    }

    #[test]
    fn test_normalize_defaults_missing_numerics_to_zero() {
        let mut record = sample_record();
        record.consensus = None;
        record.previous = None;
        let event = normalize(&record);
        assert_eq!(event.consensus, 0.0);
        assert_eq!(event.previous, 0.0);
        assert_eq!(event.actual, None);
    }

    #[test]
    fn test_normalize_full_mapping() {
        let event = normalize(&sample_record());
        assert_eq!(event.region, Region::Us);
        assert_eq!(event.category, EventCategory::Employment);
        assert_eq!(event.impact, Impact::High);
        assert_eq!(event.unit, "K");
        assert_eq!(event.affected_assets.len(), 4);
    }
}
