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

    let events = orchestrator.get_central_bank_events(from, to);

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

    println!("🏦 Central bank schedule {} → {} ({} events)\n", from, to, events.len());
    for event in &events {
        let speaker = event
            .speaker
            .as_deref()
            .map(|s| format!(" - {}", s))
            .unwrap_or_default();
        println!(
            "  {}  {} {:?}{}",
            event.datetime.format("%Y-%m-%d %H:%M"),
            event.bank,
            event.event_type,
            speaker
        );
        let p = &event.rate_probabilities;
        if p.cut > 0.0 || p.hold > 0.0 || p.hike > 0.0 {
            println!("      cut {:.0}% / hold {:.0}% / hike {:.0}%", p.cut, p.hold, p.hike);
        }
        if !event.key_topics.is_empty() {
            println!("      topics: {}", event.key_topics.join(", "));
        }
    }
}
