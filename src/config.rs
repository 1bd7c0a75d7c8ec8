use crate::error::{AppError, Result};
use chrono::{Duration, NaiveDate, Utc};

/// Tokens that mark an API key as "never filled in". A key equal to one of
/// these (case-insensitive) is treated the same as an absent key.
pub const PLACEHOLDER_TOKENS: &[&str] = &["YOUR_API_KEY", "CHANGEME", "demo", "placeholder", "xxx"];

/// Returns true when a credential value is usable: non-empty after trimming
/// and not a known placeholder.
pub fn is_configured(key: &str) -> bool {
    let key = key.trim();
    if key.is_empty() {
        return false;
    }
    !PLACEHOLDER_TOKENS
        .iter()
        .any(|token| key.eq_ignore_ascii_case(token))
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Runtime configuration, read once from the environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Finnhub economic calendar API key (primary provider)
    pub finnhub_api_key: Option<String>,

    /// Financial Modeling Prep API key (secondary provider)
    pub fmp_api_key: Option<String>,

    /// Text-completion endpoint used by the enrichment engine
    pub generative_api_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            finnhub_api_key: env_opt("FINNHUB_API_KEY"),
            fmp_api_key: env_opt("FMP_API_KEY"),
            generative_api_url: env_opt("GENERATIVE_API_URL"),
        }
    }

    /// Credential usable for the primary provider, if any.
    pub fn finnhub_key(&self) -> Option<&str> {
        self.finnhub_api_key
            .as_deref()
            .filter(|k| is_configured(k))
    }

    /// Credential usable for the secondary provider, if any.
    pub fn fmp_key(&self) -> Option<&str> {
        self.fmp_api_key.as_deref().filter(|k| is_configured(k))
    }

    /// Generative endpoint, if configured.
    pub fn generative_url(&self) -> Option<&str> {
        self.generative_api_url
            .as_deref()
            .filter(|u| is_configured(u))
    }
}

/// Parse a YYYY-MM-DD date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::InvalidInput(format!("Invalid date '{}': {}", s, e)))
}

/// Resolve an optional from/to pair into a concrete window.
/// Defaults to [today, today + 7 days).
pub fn resolve_window(from: Option<&str>, to: Option<&str>) -> Result<(NaiveDate, NaiveDate)> {
    let from = match from {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let to = match to {
        Some(s) => parse_date(s)?,
        None => from + Duration::days(7),
    };
    if to <= from {
        return Err(AppError::InvalidInput(format!(
            "Window end {} must be after start {}",
            to, from
        )));
    }
    Ok((from, to))
}
