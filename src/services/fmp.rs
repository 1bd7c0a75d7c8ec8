//! Financial Modeling Prep economic calendar client (secondary provider).
//!
//! API: `GET https://financialmodelingprep.com/api/v3/economic_calendar?from&to&apikey=KEY`
//! Success shape is a bare JSON array of records.

use crate::config::is_configured;
use crate::error::{AppError, Result};
use crate::services::finnhub::parse_provider_time;
use crate::services::provider::{body_snippet, EventProvider, ProviderRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct FmpEvent {
    event: String,
    country: String,
    /// "2026-08-07 13:30:00"
    date: String,
    #[serde(default)]
    impact: Option<String>,
    #[serde(default)]
    actual: Option<f64>,
    #[serde(default)]
    estimate: Option<f64>,
    #[serde(default)]
    previous: Option<f64>,
    #[serde(default)]
    unit: Option<String>,
}

pub struct FmpClient {
    client: Client,
    api_key: Option<String>,
}

impl FmpClient {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, api_key })
    }

    fn parse_record(raw: FmpEvent) -> Option<ProviderRecord> {
        let datetime = parse_provider_time(&raw.date)?;
        Some(ProviderRecord {
            name: raw.event,
            country: raw.country,
            datetime,
            impact: raw.impact.unwrap_or_default(),
            actual: raw.actual,
            consensus: raw.estimate,
            previous: raw.previous,
            unit: raw.unit.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl EventProvider for FmpClient {
    fn name(&self) -> &'static str {
        "fmp"
    }

    async fn fetch_raw_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<ProviderRecord>> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| is_configured(k))
            .ok_or(AppError::CredentialMissing("fmp"))?;

        let url = format!(
            "{}/economic_calendar?from={}&to={}&apikey={}",
            BASE_URL, from, to, key
        );
        debug!("Fetching economic calendar: {}/economic_calendar?from={}&to={}", BASE_URL, from, to);

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
        let parsed: Vec<FmpEvent> = serde_json::from_str(&body)
            .map_err(|e| AppError::Parse(format!("FMP response: {}", e)))?;

        let records: Vec<ProviderRecord> =
            parsed.into_iter().filter_map(Self::parse_record).collect();

        debug!("FMP returned {} calendar records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credential_skips_call() {
        let client = FmpClient::new(None).unwrap();
        let result = client
            .fetch_raw_events(
                NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
            )
            .await;
        assert!(matches!(result, Err(AppError::CredentialMissing("fmp"))));
    }

    #[test]
    fn test_parse_bare_array_payload() {
        let body = r#"[
            {"event":"Nonfarm Payrolls","country":"US","date":"2026-08-07 12:30:00",
             "impact":"High","estimate":180.0,"previous":175.0},
            {"event":"Trade Balance","country":"DE","date":"2026-08-08 06:00:00"}
        ]"#;
        let parsed: Vec<FmpEvent> = serde_json::from_str(body).unwrap();
        let records: Vec<ProviderRecord> = parsed
            .into_iter()
            .filter_map(FmpClient::parse_record)
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].consensus, Some(180.0));
        // Missing numerics stay None at the transport layer; the normalizer
        // turns them into 0.0
        assert_eq!(records[1].consensus, None);
        assert_eq!(records[1].impact, "");
    }
}
