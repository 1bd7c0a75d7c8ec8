//! Ingestion fallback chain: primary provider, then secondary, then the
//! synthetic dataset.
//!
//! The chain is an explicit state machine so each transition can be tested
//! in isolation. The synthetic stage always succeeds, which makes total
//! ingestion failure structurally impossible: `get_events` never returns an
//! empty list and never returns an error. Staleness degrades silently
//! instead of surfacing to the dashboard.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{CentralBankEvent, EconomicEvent};
use crate::services::enrichment::EnrichmentEngine;
use crate::services::finnhub::FinnhubClient;
use crate::services::fmp::FmpClient;
use crate::services::generative::GenerativeClient;
use crate::services::normalizer::normalize;
use crate::services::provider::{EventProvider, ProviderRecord};
use crate::services::synthetic;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Named states of the fallback chain, in attempt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionStage {
    TryPrimary,
    TrySecondary,
    UseSynthetic,
}

impl IngestionStage {
    /// The state entered after this one fails. `UseSynthetic` cannot fail.
    pub fn next(&self) -> Option<IngestionStage> {
        match self {
            IngestionStage::TryPrimary => Some(IngestionStage::TrySecondary),
            IngestionStage::TrySecondary => Some(IngestionStage::UseSynthetic),
            IngestionStage::UseSynthetic => None,
        }
    }
}

pub struct IngestionOrchestrator {
    primary: Box<dyn EventProvider>,
    secondary: Box<dyn EventProvider>,
    enrichment: EnrichmentEngine,
}

impl IngestionOrchestrator {
    pub fn new(
        primary: Box<dyn EventProvider>,
        secondary: Box<dyn EventProvider>,
        enrichment: EnrichmentEngine,
    ) -> Self {
        Self {
            primary,
            secondary,
            enrichment,
        }
    }

    /// Wire up the production chain: Finnhub, then FMP, then synthetic.
    pub fn from_config(config: &Config) -> Result<Self> {
        let primary = FinnhubClient::new(config.finnhub_api_key.clone())?;
        let secondary = FmpClient::new(config.fmp_api_key.clone())?;
        let enrichment = EnrichmentEngine::new(GenerativeClient::from_config(config));
        Ok(Self::new(
            Box::new(primary),
            Box::new(secondary),
            enrichment,
        ))
    }

    /// Fetch, normalize, and enrich events for `[from, to)`. Total: always
    /// returns at least the synthetic dataset.
    pub async fn get_events(&self, from: NaiveDate, to: NaiveDate) -> Vec<EconomicEvent> {
        let mut stage = IngestionStage::TryPrimary;

        loop {
            let outcome = match stage {
                IngestionStage::TryPrimary => self.try_provider(&*self.primary, from, to).await,
                IngestionStage::TrySecondary => self.try_provider(&*self.secondary, from, to).await,
                IngestionStage::UseSynthetic => {
                    info!("All providers unavailable, serving synthetic calendar");
                    return self.enrich_all(synthetic::synthetic_records(from)).await;
                }
            };

            match outcome {
                Ok(events) => return events,
                Err(AppError::CredentialMissing(provider)) => {
                    // Not a failure: the call was never attempted
                    debug!("Skipping {} (credential not configured)", provider);
                }
                Err(e) => {
                    warn!("Provider stage {:?} failed: {}", stage, e);
                }
            }

            stage = stage.next().expect("synthetic stage cannot fail");
        }
    }

    /// Central-bank schedule for the window. No provider in the chain
    /// carries one, so this is always the re-timestamped template set.
    pub fn get_central_bank_events(&self, from: NaiveDate, _to: NaiveDate) -> Vec<CentralBankEvent> {
        synthetic::central_bank_events(from)
    }

    async fn try_provider(
        &self,
        provider: &dyn EventProvider,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<EconomicEvent>> {
        let records = provider.fetch_raw_events(from, to).await?;
        if records.is_empty() {
            // An empty calendar would violate the never-empty contract;
            // treat it like a provider failure and keep falling back
            return Err(AppError::Parse(format!(
                "{} returned no records for {}..{}",
                provider.name(),
                from,
                to
            )));
        }

        info!(
            "Ingested {} records from {} for {}..{}",
            records.len(),
            provider.name(),
            from,
            to
        );
        Ok(self.enrich_all(records).await)
    }

    async fn enrich_all(&self, records: Vec<ProviderRecord>) -> Vec<EconomicEvent> {
        let mut events = Vec::with_capacity(records.len());
        for record in &records {
            let mut event = normalize(record);
            self.enrichment.enrich(&mut event).await;
            events.push(event);
        }
        events
    }
}
