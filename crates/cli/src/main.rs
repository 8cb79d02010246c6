//! FairScore CLI - Main entry point

use clap::{Parser, Subcommand};
use fairscore_cli::{commands, AppContext};
use fairscore_fairness::audit::{DEFAULT_THRESHOLD, DEFAULT_TOLERANCE};
use fairscore_ledger::{AuditPayload, PayloadCipher};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fairscore")]
#[command(about = "FairScore - Explainable credit scoring with a fairness audit trail", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    /// Ledger configuration file (JSON); defaults to FAIRSCORE_* env vars
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the feature vector and portfolio summary from a statement
    Features {
        /// JSON array of transactions
        transactions: PathBuf,
    },

    /// Score a feature vector
    Score {
        /// JSON feature object (or `features` command output)
        features: PathBuf,
    },

    /// Compare approval rates of two cohorts
    Audit {
        /// Protected cohort scores, comma separated
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        protected: Vec<f64>,
        /// Reference cohort scores, comma separated
        #[arg(long, value_delimiter = ',', num_args = 0..)]
        reference: Vec<f64>,
        /// Approval threshold
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: i32,
        /// Maximum tolerated disparity
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
    },

    /// Append an audit decision to the ledger
    Publish {
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: i32,
        #[arg(long, allow_hyphen_values = true)]
        spd: f64,
        #[arg(long, allow_hyphen_values = true)]
        eo: f64,
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
        #[arg(long)]
        recommended_threshold: i32,
        /// The audit passed
        #[arg(long)]
        passed: bool,
    },

    /// Verify the ledger hash chain
    Verify,

    /// Generate a new ledger encryption key
    Keygen,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing, logs go to stderr so stdout stays JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Features { transactions } => {
            commands::features(&transactions)?;
        }

        Commands::Score { features } => {
            let ctx = AppContext::load(&cli.data, cli.config.as_deref())?;
            commands::score(&ctx, &features)?;
        }

        Commands::Audit {
            protected,
            reference,
            threshold,
            tolerance,
        } => {
            commands::audit(&protected, &reference, threshold, tolerance)?;
        }

        Commands::Publish {
            threshold,
            spd,
            eo,
            tolerance,
            recommended_threshold,
            passed,
        } => {
            let ctx = AppContext::load(&cli.data, cli.config.as_deref())?;
            let publisher = ctx.spawn_publisher()?;

            let payload =
                AuditPayload::new(threshold, spd, eo, tolerance, recommended_threshold, passed);
            commands::publish(&publisher, payload).await?;
        }

        Commands::Verify => {
            let ctx = AppContext::load(&cli.data, cli.config.as_deref())?;
            if let Err(e) = commands::verify(&ctx) {
                println!("❌ Ledger verification failed: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Keygen => {
            let key = PayloadCipher::generate_key();
            println!("✅ Generated ledger encryption key");
            println!();
            println!("To use: export FAIRSCORE_LEDGER_KEY={}", key);
        }
    }

    Ok(())
}
