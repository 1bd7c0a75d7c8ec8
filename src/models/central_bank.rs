use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralBankEventType {
    Meeting,
    Speech,
    Minutes,
}

/// Market-implied rate-move probabilities in percent. Each lies in 0-100;
/// they need not sum to 100, and "no probabilities known" is all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RateProbabilities {
    pub cut: f64,
    pub hold: f64,
    pub hike: f64,
}

/// A scheduled central-bank meeting, speech, or minutes release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralBankEvent {
    pub bank: String,
    pub event_type: CentralBankEventType,
    pub datetime: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    pub rate_probabilities: RateProbabilities,
    pub key_topics: Vec<String>,
}
