use crate::analytics::CorrelationMatrix;
use crate::models::LeadLag;
use crate::services::synthetic;
use serde_json::json;

/// Number of samples in each instrument's return series.
const SERIES_LEN: usize = 256;

/// Maximum lag scanned when classifying lead/lag, in series steps.
const MAX_LAG_STEPS: usize = 6;

pub async fn run(top: usize, json_output: bool) {
    let series = synthetic::instrument_series(SERIES_LEN);
    let matrix = CorrelationMatrix::build(&series, MAX_LAG_STEPS, synthetic::SERIES_STEP_MINUTES);

    if json_output {
        let payload = json!({
            "topCorrelations": matrix.top_k(top).into_iter().cloned().collect::<Vec<_>>(),
            "impactChains": matrix.render_chains(),
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("❌ Failed to serialize matrix: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!(
        "🔗 Key relationships ({} instruments, {} pairs)\n",
        series.len(),
        matrix.len()
    );
    for correlation in matrix.top_k(top) {
        let relationship = match correlation.relationship {
            LeadLag::Leads => match correlation.lag_minutes {
                Some(minutes) => format!("leads by {}m", minutes),
                None => "leads".to_string(),
            },
            LeadLag::Lags => match correlation.lag_minutes {
                Some(minutes) => format!("lags by {}m", minutes),
                None => "lags".to_string(),
            },
            LeadLag::Simultaneous => "simultaneous".to_string(),
        };
        println!(
            "  {:<8} ↔ {:<8} {:+.3}  ({})",
            correlation.pair.0, correlation.pair.1, correlation.strength, relationship
        );
    }

    println!("\n⛓️  Impact chains\n");
    for chain in matrix.render_chains() {
        println!("  {}", chain.name);
        for link in &chain.links {
            match &link.correlation {
                Some(c) => println!("    {} → {} ({:+.3})", link.from, link.to, c.strength),
                None => println!("    {} → {} (no data)", link.from, link.to),
            }
        }
    }
}
