use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "macropulse")]
#[command(about = "Economic event aggregation and correlation analytics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the economic calendar for a date window
    Calendar {
        /// Start date (YYYY-MM-DD), default today
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD), default from + 7 days
        #[arg(long)]
        to: Option<String>,
        /// Print raw JSON instead of the table view
        #[arg(long)]
        json: bool,
    },
    /// Show the scheduled central-bank events
    CentralBanks {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Compute cross-asset correlations and impact chains
    Correlations {
        /// How many relationships to show
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[arg(long)]
        json: bool,
    },
    /// Start the HTTP API server
    Serve {
        #[arg(short, long, default_value_t = 8686)]
        port: u16,
    },
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Calendar { from, to, json } => {
            commands::calendar::run(from, to, json).await;
        }
        Commands::CentralBanks { from, to, json } => {
            commands::central_banks::run(from, to, json).await;
        }
        Commands::Correlations { top, json } => {
            commands::correlations::run(top, json).await;
        }
        Commands::Serve { port } => {
            commands::serve::run(port).await;
        }
    }
}
