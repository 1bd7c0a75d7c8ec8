use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Maximum length of a response-body snippet carried in provider errors.
pub const SNIPPET_MAX_LEN: usize = 200;

/// Truncate a response body for inclusion in an error message.
pub fn body_snippet(body: &str) -> String {
    if body.len() > SNIPPET_MAX_LEN {
        let mut end = SNIPPET_MAX_LEN;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated)", &body[..end])
    } else {
        body.to_string()
    }
}

/// Provider-agnostic transport record: the common denominator both calendar
/// APIs are parsed into before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRecord {
    pub name: String,
    pub country: String,
    pub datetime: DateTime<Utc>,
    /// Raw impact string as the provider sent it ("high", "2", ...)
    pub impact: String,
    pub actual: Option<f64>,
    pub consensus: Option<f64>,
    pub previous: Option<f64>,
    pub unit: String,
}

/// One external economic-calendar source.
///
/// Adapters are single-shot: no retries inside `fetch_raw_events`. The
/// fallback policy lives in the orchestrator, which keeps adapter behavior
/// deterministic under test.
#[async_trait]
pub trait EventProvider: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch raw calendar records for `[from, to]`.
    ///
    /// Fails with `AppError::CredentialMissing` when the credential is
    /// absent or a placeholder (without attempting a call),
    /// `AppError::Provider` on a non-2xx response, `AppError::Network` on
    /// transport errors or timeout, and `AppError::Parse` on malformed JSON.
    async fn fetch_raw_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ProviderRecord>>;
}
