//! Synthetic dataset: the terminal stage of the ingestion fallback chain.
//!
//! One record per template, re-timestamped by spreading them evenly from the
//! start of the requested window, so the calendar is never empty no matter
//! when the templates were authored. Also home of the deterministic
//! per-instrument return series that feed the correlation matrix.

use crate::models::{CentralBankEvent, CentralBankEventType, RateProbabilities};
use crate::services::provider::ProviderRecord;
use crate::utils::fnv1a_hash;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hours between consecutive synthetic events.
pub const EVENT_SPACING_HOURS: i64 = 4;

pub struct EventTemplate {
    pub name: &'static str,
    pub country: &'static str,
    pub impact: &'static str,
    pub consensus: f64,
    pub previous: f64,
    pub unit: &'static str,
}

/// Representative releases across regions and categories. Order matters:
/// event i lands at `from + 4h * i`.
pub const EVENT_TEMPLATES: &[EventTemplate] = &[
    EventTemplate {
        name: "Non-Farm Payrolls",
        country: "United States",
        impact: "high",
        consensus: 180.0,
        previous: 175.0,
        unit: "K",
    },
    EventTemplate {
        name: "CPI YoY",
        country: "United States",
        impact: "high",
        consensus: 3.2,
        previous: 3.4,
        unit: "%",
    },
    EventTemplate {
        name: "ECB Interest Rate Decision",
        country: "Euro Area",
        impact: "high",
        consensus: 4.0,
        previous: 4.0,
        unit: "%",
    },
    EventTemplate {
        name: "GDP QoQ",
        country: "United Kingdom",
        impact: "medium",
        consensus: 0.2,
        previous: 0.1,
        unit: "%",
    },
    EventTemplate {
        name: "BoJ Policy Rate",
        country: "Japan",
        impact: "high",
        consensus: 0.25,
        previous: 0.25,
        unit: "%",
    },
    EventTemplate {
        name: "Retail Sales MoM",
        country: "United States",
        impact: "medium",
        consensus: 0.3,
        previous: 0.4,
        unit: "%",
    },
    EventTemplate {
        name: "Manufacturing PMI",
        country: "Germany",
        impact: "medium",
        consensus: 45.1,
        previous: 44.8,
        unit: "Index",
    },
    EventTemplate {
        name: "Trade Balance",
        country: "China",
        impact: "medium",
        consensus: 75.3,
        previous: 68.9,
        unit: "B",
    },
    EventTemplate {
        name: "Housing Starts",
        country: "United States",
        impact: "low",
        consensus: 1.35,
        previous: 1.42,
        unit: "M",
    },
    EventTemplate {
        name: "Crude Oil Inventories",
        country: "United States",
        impact: "medium",
        consensus: -1.2,
        previous: 2.1,
        unit: "M bbl",
    },
];

/// Synthetic provider records spread across `[from, from + 4h * N)`.
pub fn synthetic_records(from: NaiveDate) -> Vec<ProviderRecord> {
    let window_start = from.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();

    EVENT_TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, template)| ProviderRecord {
            name: template.name.to_string(),
            country: template.country.to_string(),
            datetime: window_start + Duration::hours(EVENT_SPACING_HOURS * i as i64),
            impact: template.impact.to_string(),
            actual: None,
            consensus: Some(template.consensus),
            previous: Some(template.previous),
            unit: template.unit.to_string(),
        })
        .collect()
}

pub struct CentralBankTemplate {
    pub bank: &'static str,
    pub event_type: CentralBankEventType,
    pub speaker: Option<&'static str>,
    pub probabilities: RateProbabilities,
    pub key_topics: &'static [&'static str],
    /// Hours after the window start
    pub offset_hours: i64,
}

pub const CENTRAL_BANK_TEMPLATES: &[CentralBankTemplate] = &[
    CentralBankTemplate {
        bank: "Federal Reserve",
        event_type: CentralBankEventType::Meeting,
        speaker: None,
        probabilities: RateProbabilities {
            cut: 35.0,
            hold: 60.0,
            hike: 5.0,
        },
        key_topics: &["inflation trajectory", "labor market", "balance sheet runoff"],
        offset_hours: 12,
    },
    CentralBankTemplate {
        bank: "European Central Bank",
        event_type: CentralBankEventType::Speech,
        speaker: Some("Christine Lagarde"),
        probabilities: RateProbabilities {
            cut: 20.0,
            hold: 75.0,
            hike: 5.0,
        },
        key_topics: &["wage growth", "services inflation"],
        offset_hours: 36,
    },
    CentralBankTemplate {
        bank: "Bank of England",
        event_type: CentralBankEventType::Minutes,
        speaker: None,
        // Minutes carry no rate pricing
        probabilities: RateProbabilities {
            cut: 0.0,
            hold: 0.0,
            hike: 0.0,
        },
        key_topics: &["vote split", "QT pace"],
        offset_hours: 60,
    },
    CentralBankTemplate {
        bank: "Bank of Japan",
        event_type: CentralBankEventType::Speech,
        speaker: Some("Kazuo Ueda"),
        probabilities: RateProbabilities {
            cut: 0.0,
            hold: 80.0,
            hike: 20.0,
        },
        key_topics: &["yield curve control", "yen weakness"],
        offset_hours: 84,
    },
];

/// Central-bank events re-timestamped into the requested window.
pub fn central_bank_events(from: NaiveDate) -> Vec<CentralBankEvent> {
    let window_start = from.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();

    CENTRAL_BANK_TEMPLATES
        .iter()
        .map(|template| CentralBankEvent {
            bank: template.bank.to_string(),
            event_type: template.event_type,
            datetime: window_start + Duration::hours(template.offset_hours),
            speaker: template.speaker.map(|s| s.to_string()),
            rate_probabilities: template.probabilities,
            key_topics: template.key_topics.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

/// Instruments the correlation matrix is built over. The union of the
/// normalizer's region assets and the impact-chain members.
pub const MATRIX_INSTRUMENTS: &[&str] = &[
    "DXY", "EUR/USD", "GBP/USD", "USD/JPY", "SPY", "DAX", "FTSE", "Nikkei", "Gold", "WTI",
    "US10Y", "EEM",
];

/// Sampling interval of the synthetic return series, in minutes.
pub const SERIES_STEP_MINUTES: u32 = 60;

/// Deterministic per-instrument return series.
///
/// Every instrument is a weighted blend of a shared market factor (itself
/// seeded from a fixed tag) and idiosyncratic noise, with a per-instrument
/// lag of 0-2 steps on the factor. The blend gives the matrix meaningful
/// cross-correlations and lead/lag structure while staying reproducible
/// across runs.
pub fn return_series(symbol: &str, len: usize) -> Vec<f64> {
    let hash = fnv1a_hash(symbol);
    let lag = (hash % 3) as usize;

    let mut factor_rng = StdRng::seed_from_u64(fnv1a_hash("market-factor"));
    let factor: Vec<f64> = (0..len + lag).map(|_| factor_rng.gen_range(-1.5..1.5)).collect();

    let mut noise_rng = StdRng::seed_from_u64(hash);
    // Factor loading in [-1, 1], fixed per symbol
    let beta = ((hash >> 8) % 2001) as f64 / 1000.0 - 1.0;

    (0..len)
        .map(|i| {
            beta * factor[i + lag] + (1.0 - beta.abs() * 0.5) * noise_rng.gen_range(-0.8..0.8)
        })
        .collect()
}

/// Series map for the full instrument set, ready for the matrix builder.
pub fn instrument_series(len: usize) -> std::collections::BTreeMap<String, Vec<f64>> {
    MATRIX_INSTRUMENTS
        .iter()
        .map(|symbol| (symbol.to_string(), return_series(symbol, len)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_spread_from_window_start() {
        let from = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        let records = synthetic_records(from);

        assert_eq!(records.len(), EVENT_TEMPLATES.len());
        assert_eq!(
            records[0].datetime,
            from.and_hms_opt(0, 0, 0).unwrap().and_utc()
        );
        for pair in records.windows(2) {
            assert_eq!(
                pair[1].datetime - pair[0].datetime,
                Duration::hours(EVENT_SPACING_HOURS)
            );
        }
    }

    #[test]
    fn test_central_bank_events_in_window() {
        let from = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
        let window_start = from.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let window_end = window_start + Duration::days(7);

        let events = central_bank_events(from);
        assert_eq!(events.len(), CENTRAL_BANK_TEMPLATES.len());
        for event in &events {
            assert!(event.datetime >= window_start && event.datetime < window_end);
        }
        // Minutes template carries no rate pricing
        let minutes = events
            .iter()
            .find(|e| e.event_type == CentralBankEventType::Minutes)
            .unwrap();
        assert_eq!(minutes.rate_probabilities, RateProbabilities::default());
    }

    #[test]
    fn test_return_series_deterministic() {
        assert_eq!(return_series("SPY", 64), return_series("SPY", 64));
        assert_ne!(return_series("SPY", 64), return_series("Gold", 64));
        assert_eq!(return_series("SPY", 64).len(), 64);
    }
}
