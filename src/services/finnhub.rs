//! Finnhub economic calendar client (primary provider).
//!
//! API: `GET https://finnhub.io/api/v1/calendar/economic?from&to&token=KEY`
//! Success shape: `{"economicCalendar": [{event, country, time, impact,
//! actual, estimate, prev, unit}, ...]}`.

use crate::config::is_configured;
use crate::error::{AppError, Result};
use crate::services::provider::{body_snippet, EventProvider, ProviderRecord};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const BASE_URL: &str = "https://finnhub.io/api/v1";

/// Per-request timeout. A hung provider must not stall the fallback chain.
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct FinnhubCalendarResponse {
    #[serde(rename = "economicCalendar", default)]
    economic_calendar: Vec<FinnhubEvent>,
}

#[derive(Debug, Deserialize)]
struct FinnhubEvent {
    event: String,
    country: String,
    /// "2026-08-07 13:30:00" or date-only "2026-08-07"
    time: String,
    #[serde(default)]
    impact: Option<String>,
    #[serde(default)]
    actual: Option<f64>,
    #[serde(default)]
    estimate: Option<f64>,
    #[serde(default)]
    prev: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
}

pub struct FinnhubClient {
    client: Client,
    api_key: Option<String>,
}

impl FinnhubClient {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, api_key })
    }

    fn parse_record(raw: FinnhubEvent) -> Option<ProviderRecord> {
        let datetime = parse_provider_time(&raw.time)?;
        Some(ProviderRecord {
            name: raw.event,
            country: raw.country,
            datetime,
            impact: raw.impact.unwrap_or_default(),
            actual: raw.actual,
            consensus: raw.estimate,
            previous: raw.prev,
            unit: raw.unit.unwrap_or_default(),
        })
    }
}

/// Parse a provider timestamp, accepting datetime and date-only forms.
pub(crate) fn parse_provider_time(raw: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    warn!("Skipping record with unparseable time: {}", raw);
    None
}

#[async_trait]
impl EventProvider for FinnhubClient {
    fn name(&self) -> &'static str {
        "finnhub"
    }

    async fn fetch_raw_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ProviderRecord>> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| is_configured(k))
            .ok_or(AppError::CredentialMissing("finnhub"))?;

        let url = format!(
            "{}/calendar/economic?from={}&to={}&token={}",
            BASE_URL, from, to, key
        );
        debug!("Fetching economic calendar: {}/calendar/economic?from={}&to={}", BASE_URL, from, to);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider {
                status: status.as_u16(),
                snippet: body_snippet(&body),
            });
        }

        let body = response.text().await?;
        let parsed: FinnhubCalendarResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("Finnhub response: {}", e)))?;

        let records: Vec<ProviderRecord> = parsed
            .economic_calendar
            .into_iter()
            .filter_map(Self::parse_record)
            .collect();

        debug!("Finnhub returned {} calendar records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credential_skips_call() {
        // No key and a placeholder key both fail fast, without any network
        for key in [None, Some("YOUR_API_KEY".to_string())] {
            let client = FinnhubClient::new(key).unwrap();
            let result = client
                .fetch_raw_events(
                    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                    NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
                )
                .await;
            assert!(matches!(result, Err(AppError::CredentialMissing("finnhub"))));
        }
    }

    #[test]
    fn test_parse_provider_time_forms() {
        assert!(parse_provider_time("2026-08-07 13:30:00").is_some());
        assert!(parse_provider_time("2026-08-07").is_some());
        assert!(parse_provider_time("last tuesday").is_none());
    }

    #[test]
    fn test_parse_calendar_payload() {
        let body = r#"{"economicCalendar":[
            {"event":"CPI YoY","country":"US","time":"2026-08-07 12:30:00",
             "impact":"high","estimate":3.2,"prev":3.4,"unit":"%"}
        ]}"#;
        let parsed: FinnhubCalendarResponse = serde_json::from_str(body).unwrap();
        let record = FinnhubClient::parse_record(parsed.economic_calendar.into_iter().next().unwrap())
            .unwrap();
        assert_eq!(record.name, "CPI YoY");
        assert_eq!(record.consensus, Some(3.2));
        assert_eq!(record.actual, None);
        assert_eq!(record.unit, "%");
    }

    #[tokio::test]
    #[ignore] // Requires FINNHUB_API_KEY and network access
    async fn test_live_fetch() {
        let client = FinnhubClient::new(std::env::var("FINNHUB_API_KEY").ok()).unwrap();
        let today = chrono::Utc::now().date_naive();
        let records = client
            .fetch_raw_events(today, today + chrono::Duration::days(7))
            .await
            .unwrap();
        assert!(!records.is_empty());
    }
}
