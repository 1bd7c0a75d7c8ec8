use serde::{Deserialize, Serialize};

/// Lead/lag classification of the first instrument in a pair relative to the
/// second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadLag {
    Leads,
    Lags,
    Simultaneous,
}

/// Computed relationship between two instruments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correlation {
    /// Ordered pair of instrument names
    pub pair: (String, String),
    /// Pearson correlation at the best lag, in [-1, 1]
    pub strength: f64,
    pub relationship: LeadLag,
    /// Absolute lag in minutes; None when simultaneous
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lag_minutes: Option<u32>,
}
