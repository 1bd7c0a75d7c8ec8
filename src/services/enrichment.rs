//! Event enrichment: historical-impact stats, consensus intelligence, and a
//! trading setup for each normalized event.
//!
//! Two paths. The generative path prompts the configured text-completion
//! service and validates the JSON object embedded in its reply. Any failure
//! there (endpoint unconfigured, network, non-JSON reply, missing or
//! out-of-range fields) falls through to a deterministic derivation from
//! the event's own attributes. Enrichment never fails.

use crate::models::{
    ConsensusIntelligence, DirectionBias, EconomicEvent, EventCategory, HistoricalStats, Impact,
    RevisionMomentum, TradingSetup,
};
use crate::services::generative::{extract_json_object, GenerativeClient};
use crate::utils::fnv1a_hash;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::debug;

/// Relative steps for the analyst-estimate distribution around the anchor.
const DISTRIBUTION_STEPS: &[f64] = &[-0.04, -0.02, 0.0, 0.02, 0.04];

#[derive(Debug, Deserialize)]
struct GeneratedHistorical {
    avg_move_pct: f64,
    direction_bias: String,
    bias_success_rate: f64,
    peak_impact_minutes: u32,
    fade_time_hours: u32,
}

#[derive(Debug, Deserialize)]
struct GeneratedSetup {
    strategy: String,
    expected_move_pct: f64,
    confidence: f64,
}

pub struct EnrichmentEngine {
    generative: Option<GenerativeClient>,
}

impl EnrichmentEngine {
    pub fn new(generative: Option<GenerativeClient>) -> Self {
        Self { generative }
    }

    /// Fill in the analytics payloads of a normalized event, in place.
    ///
    /// The two generative calls are independent and issued concurrently;
    /// whichever fails (or both) is replaced by the deterministic fallback.
    /// Consensus intelligence is always derived deterministically.
    pub async fn enrich(&self, event: &mut EconomicEvent) {
        let (historical, setup) = match &self.generative {
            Some(client) => tokio::join!(
                generate_historical(client, event),
                generate_setup(client, event)
            ),
            None => (None, None),
        };

        event.historical_stats = historical.unwrap_or_else(|| fallback_historical(event));
        event.trading_setup = setup.unwrap_or_else(|| fallback_setup(event));
        event.consensus_intelligence = fallback_consensus(event);
    }
}

fn historical_prompt(event: &EconomicEvent) -> String {
    format!(
        "You are a macro analyst. For the economic release \"{}\" ({}, {} impact, \
         affecting {}), summarize its typical market impact as a single JSON object \
         with exactly these fields: avg_move_pct (number), direction_bias \
         (\"bullish\"|\"bearish\"|\"neutral\"), bias_success_rate (0-100), \
         peak_impact_minutes (integer), fade_time_hours (integer).",
        event.name,
        event.country,
        event.impact.as_str(),
        event.affected_assets.join(", ")
    )
}

fn setup_prompt(event: &EconomicEvent) -> String {
    format!(
        "You are a macro analyst. Propose a trading setup for the release \"{}\" \
         ({}, {} impact, consensus {}{}). Reply with a single JSON object with \
         exactly these fields: strategy (short label), expected_move_pct (number), \
         confidence (0-100).",
        event.name,
        event.country,
        event.impact.as_str(),
        event.consensus,
        event.unit
    )
}

async fn generate_historical(
    client: &GenerativeClient,
    event: &EconomicEvent,
) -> Option<HistoricalStats> {
    let text = match client.complete(&historical_prompt(event)).await {
        Ok(text) => text,
        Err(e) => {
            debug!("Generative historical stats failed for {}: {}", event.id, e);
            return None;
        }
    };

    let object = extract_json_object(&text)?;
    let parsed: GeneratedHistorical = serde_json::from_str(object).ok()?;

    let direction_bias = parse_bias(&parsed.direction_bias)?;
    if parsed.avg_move_pct < 0.0 || !(0.0..=100.0).contains(&parsed.bias_success_rate) {
        return None;
    }

    Some(HistoricalStats {
        avg_move_pct: parsed.avg_move_pct,
        direction_bias,
        bias_success_rate: parsed.bias_success_rate,
        peak_impact_minutes: parsed.peak_impact_minutes,
        fade_time_hours: parsed.fade_time_hours,
    })
}

async fn generate_setup(client: &GenerativeClient, event: &EconomicEvent) -> Option<TradingSetup> {
    let text = match client.complete(&setup_prompt(event)).await {
        Ok(text) => text,
        Err(e) => {
            debug!("Generative trading setup failed for {}: {}", event.id, e);
            return None;
        }
    };

    let object = extract_json_object(&text)?;
    let parsed: GeneratedSetup = serde_json::from_str(object).ok()?;

    if parsed.strategy.trim().is_empty()
        || parsed.expected_move_pct < 0.0
        || !(0.0..=100.0).contains(&parsed.confidence)
    {
        return None;
    }

    Some(TradingSetup {
        strategy: parsed.strategy,
        expected_move_pct: parsed.expected_move_pct,
        confidence: parsed.confidence,
        correlated_assets: event.affected_assets.clone(),
    })
}

fn parse_bias(raw: &str) -> Option<DirectionBias> {
    match raw.trim().to_lowercase().as_str() {
        "bullish" => Some(DirectionBias::Bullish),
        "bearish" => Some(DirectionBias::Bearish),
        "neutral" => Some(DirectionBias::Neutral),
        _ => None,
    }
}

/// Seeded generator for an event. Keyed by the event id, so the same event
/// always produces the same pseudo-analytics.
fn event_rng(event: &EconomicEvent) -> StdRng {
    StdRng::seed_from_u64(fnv1a_hash(&event.id))
}

fn fallback_historical(event: &EconomicEvent) -> HistoricalStats {
    let mut rng = event_rng(event);

    let (base_move, peak_minutes) = match event.impact {
        Impact::High => (1.2, 15),
        Impact::Medium => (0.6, 30),
        Impact::Low => (0.2, 60),
    };

    let direction_bias = match fnv1a_hash(&event.id) % 3 {
        0 => DirectionBias::Bullish,
        1 => DirectionBias::Bearish,
        _ => DirectionBias::Neutral,
    };

    HistoricalStats {
        avg_move_pct: round2(base_move + rng.gen_range(0.0..0.8)),
        direction_bias,
        bias_success_rate: round2(rng.gen_range(55.0..80.0)),
        peak_impact_minutes: peak_minutes,
        fade_time_hours: rng.gen_range(2..8),
    }
}

fn fallback_setup(event: &EconomicEvent) -> TradingSetup {
    let mut rng = event_rng(event);

    let strategy = match event.category {
        EventCategory::Inflation => "Breakout straddle into the print",
        EventCategory::Employment => "Fade the initial spike",
        EventCategory::CentralBank => "Position for the statement, not the decision",
        EventCategory::Gdp => "Trend continuation on surprise",
        EventCategory::Manufacturing => "Range trade unless PMI crosses 50",
        EventCategory::Retail => "Momentum follow-through",
        EventCategory::Housing => "Mean reversion after the knee-jerk",
        EventCategory::Trade => "Wait for confirmation, then follow",
    };

    let base_move = match event.impact {
        Impact::High => 1.0,
        Impact::Medium => 0.5,
        Impact::Low => 0.2,
    };

    TradingSetup {
        strategy: strategy.to_string(),
        expected_move_pct: round2(base_move + rng.gen_range(0.0..0.6)),
        confidence: round2(rng.gen_range(50.0..85.0)),
        correlated_assets: event.affected_assets.clone(),
    }
}

fn fallback_consensus(event: &EconomicEvent) -> ConsensusIntelligence {
    let mut rng = event_rng(event);
    let anchor = event.anchor_value();

    let estimate_distribution = DISTRIBUTION_STEPS
        .iter()
        .map(|step| round2(anchor * (1.0 + step)))
        .collect();

    let revision_momentum = match rng.gen_range(0..3) {
        0 => RevisionMomentum::Up,
        1 => RevisionMomentum::Down,
        _ => RevisionMomentum::Stable,
    };

    let whisper_number = if rng.gen_bool(0.5) {
        Some(round2(anchor * (1.0 + rng.gen_range(-0.03..0.03))))
    } else {
        None
    };

    ConsensusIntelligence {
        estimate_distribution,
        revision_momentum,
        surprise_probability: round2(rng.gen_range(10.0..60.0)),
        whisper_number,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
