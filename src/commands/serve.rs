use crate::analytics::CorrelationMatrix;
use crate::config::Config;
use crate::server::{self, IntegrationStatus};
use crate::services::{synthetic, IngestionOrchestrator};
use std::sync::Arc;

/// Series length used for the server's startup correlation matrix.
const SERIES_LEN: usize = 256;
const MAX_LAG_STEPS: usize = 6;

pub async fn run(port: u16) {
    println!("🚀 Starting macropulse server on port {}", port);

    let config = Config::from_env();
    let integrations = IntegrationStatus::from_config(&config);

    println!("🔌 Integrations:");
    println!("   primary (finnhub):    {}", configured_label(integrations.primary_configured));
    println!("   secondary (fmp):      {}", configured_label(integrations.secondary_configured));
    println!("   generative analysis:  {}", configured_label(integrations.generative_configured));

    let orchestrator = match IngestionOrchestrator::from_config(&config) {
        Ok(orchestrator) => Arc::new(orchestrator),
        Err(e) => {
            eprintln!("❌ Failed to build ingestion chain: {}", e);
            std::process::exit(1);
        }
    };

    // The matrix is pure assembly over deterministic series; build it once
    // at startup rather than per request
    println!("📊 Building correlation matrix...");
    let series = synthetic::instrument_series(SERIES_LEN);
    let matrix = Arc::new(CorrelationMatrix::build(
        &series,
        MAX_LAG_STEPS,
        synthetic::SERIES_STEP_MINUTES,
    ));
    println!("   ✅ {} instruments, {} pairs", series.len(), matrix.len());

    if let Err(e) = server::serve(orchestrator, matrix, integrations, port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}

fn configured_label(configured: bool) -> &'static str {
    if configured {
        "✅ configured"
    } else {
        "⚠️  not configured"
    }
}
