use crate::config::{resolve_window, Config};
use crate::services::IngestionOrchestrator;

pub async fn run(from: Option<String>, to: Option<String>, json: bool) {
    let (from, to) = match resolve_window(from.as_deref(), to.as_deref()) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let config = Config::from_env();
    let orchestrator = match IngestionOrchestrator::from_config(&config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            eprintln!("❌ Failed to build ingestion chain: {}", e);
            std::process::exit(1);
        }
    };

    if config.finnhub_key().is_none() && config.fmp_key().is_none() {
        eprintln!("⚠️  No provider credentials configured - serving synthetic calendar");
    }

    let events = orchestrator.get_events(from, to).await;

    if json {
        match serde_json::to_string_pretty(&events) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("❌ Failed to serialize events: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("📅 Economic calendar {} → {} ({} events)\n", from, to, events.len());
    for event in &events {
        println!(
            "  {}  [{:<4}] {:<6} {} (consensus {}{}, previous {}{})",
            event.datetime.format("%Y-%m-%d %H:%M"),
            event.region.as_str(),
            event.impact.as_str(),
            event.name,
            event.consensus,
            event.unit,
            event.previous,
            event.unit
        );
        println!(
            "      💡 {} (expected move {:.2}%, confidence {:.0}%)",
            event.trading_setup.strategy,
            event.trading_setup.expected_move_pct,
            event.trading_setup.confidence
        );
    }
}
