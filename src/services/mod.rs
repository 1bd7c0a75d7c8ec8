pub mod enrichment;
pub mod finnhub;
pub mod fmp;
pub mod generative;
pub mod ingestion;
pub mod normalizer;
pub mod provider;
pub mod synthetic;

pub use enrichment::EnrichmentEngine;
pub use finnhub::FinnhubClient;
pub use fmp::FmpClient;
pub use generative::GenerativeClient;
pub use ingestion::{IngestionOrchestrator, IngestionStage};
pub use provider::{EventProvider, ProviderRecord};
