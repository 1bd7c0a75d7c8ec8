use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market region a release belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "Asia")]
    Asia,
    /// Emerging markets, also the bucket for unmapped countries
    #[serde(rename = "EM")]
    Em,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Eu => "EU",
            Region::Uk => "UK",
            Region::Asia => "Asia",
            Region::Em => "EM",
        }
    }
}

/// Expected market impact of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        }
    }
}

/// Release category inferred from the event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventCategory {
    Inflation,
    Employment,
    Gdp,
    CentralBank,
    Trade,
    Retail,
    Manufacturing,
    Housing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionBias {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionMomentum {
    Up,
    Down,
    #[default]
    Stable,
}

/// Historical price-impact statistics for a release type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalStats {
    /// Average absolute move across affected assets, in percent
    pub avg_move_pct: f64,
    pub direction_bias: DirectionBias,
    /// How often the bias direction played out, in percent
    pub bias_success_rate: f64,
    /// Minutes after release until peak impact
    pub peak_impact_minutes: u32,
    /// Hours until the initial move typically fades
    pub fade_time_hours: u32,
}

/// Analyst-estimate intelligence around the consensus number.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusIntelligence {
    /// Distribution of analyst estimates around the consensus
    pub estimate_distribution: Vec<f64>,
    pub revision_momentum: RevisionMomentum,
    /// Probability of the actual deviating materially from consensus, in percent
    pub surprise_probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whisper_number: Option<f64>,
}

/// Suggested positioning around the release.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSetup {
    pub strategy: String,
    pub expected_move_pct: f64,
    /// Confidence score in percent
    pub confidence: f64,
    pub correlated_assets: Vec<String>,
}

/// One scheduled macroeconomic release, normalized from whichever provider
/// supplied it.
///
/// `consensus` and `previous` are always numeric (0.0 when the provider
/// omitted them) so downstream arithmetic never has to null-check; `actual`
/// is the only legitimately absent numeric field, present only after the
/// release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicEvent {
    /// Deterministic slug of name+timestamp+country. Repeated ingestion of
    /// the same release yields the same id.
    pub id: String,
    pub name: String,
    pub country: String,
    pub region: Region,
    pub datetime: DateTime<Utc>,
    pub impact: Impact,
    pub category: EventCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    pub consensus: f64,
    pub previous: f64,
    pub unit: String,
    pub historical_stats: HistoricalStats,
    pub consensus_intelligence: ConsensusIntelligence,
    pub trading_setup: TradingSetup,
    pub affected_assets: Vec<String>,
}

impl EconomicEvent {
    /// Consensus if the provider supplied one, otherwise the previous print.
    /// Used as the anchor for estimate distributions.
    pub fn anchor_value(&self) -> f64 {
        if self.consensus != 0.0 {
            self.consensus
        } else {
            self.previous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_serde_names() {
        assert_eq!(serde_json::to_string(&Region::Us).unwrap(), "\"US\"");
        assert_eq!(serde_json::to_string(&Region::Asia).unwrap(), "\"Asia\"");
        assert_eq!(serde_json::to_string(&Region::Em).unwrap(), "\"EM\"");
    }

    #[test]
    fn test_category_serde_names() {
        assert_eq!(
            serde_json::to_string(&EventCategory::CentralBank).unwrap(),
            "\"centralBank\""
        );
        assert_eq!(
            serde_json::to_string(&EventCategory::Gdp).unwrap(),
            "\"gdp\""
        );
    }

    #[test]
    fn test_anchor_value_prefers_consensus() {
        let mut event = EconomicEvent {
            id: "x".to_string(),
            name: "CPI YoY".to_string(),
            country: "United States".to_string(),
            region: Region::Us,
            datetime: Utc::now(),
            impact: Impact::High,
            category: EventCategory::Inflation,
            actual: None,
            consensus: 3.2,
            previous: 3.4,
            unit: "%".to_string(),
            historical_stats: HistoricalStats::default(),
            consensus_intelligence: ConsensusIntelligence::default(),
            trading_setup: TradingSetup::default(),
            affected_assets: vec![],
        };
        assert_eq!(event.anchor_value(), 3.2);
        event.consensus = 0.0;
        assert_eq!(event.anchor_value(), 3.4);
    }
}
