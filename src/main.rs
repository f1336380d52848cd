use std::path::PathBuf;

use apollo_enricher::apollo_client::ApolloClient;
use apollo_enricher::batch::{self, DEFAULT_LINKEDIN_COLUMN};
use apollo_enricher::config::Config;
use apollo_enricher::credits::CreditUsage;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Enrich LinkedIn profile URLs with Apollo contact and company data.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV containing the LinkedIn URL column
    #[arg(short, long, default_value = "input.csv")]
    input: PathBuf,

    /// Output file path
    #[arg(short, long, default_value = "apollo_output.csv")]
    output: PathBuf,

    /// Output format: csv or json
    #[arg(short, long, default_value = "csv")]
    format: String,

    /// Name of the column holding LinkedIn profile URLs
    #[arg(long, default_value = DEFAULT_LINKEDIN_COLUMN)]
    linkedin_column: String,
}

/// Main entry point.
///
/// Loads configuration (a missing API key aborts with a non-zero exit), then
/// runs one batch. Batch failures are reported but do not change the exit code.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apollo_enricher=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    let client = ApolloClient::new(&config)?;

    let mut credits = CreditUsage::new();

    match batch::process_csv(
        &client,
        &args.input,
        &args.output,
        &args.format,
        &args.linkedin_column,
        &mut credits,
    )
    .await
    {
        Ok(report) => {
            tracing::info!(
                "Batch complete: {} rows written to {}",
                report.rows_processed,
                report.output_path.display()
            );
        }
        Err(e) => {
            tracing::error!("{}", e);
        }
    }

    // Printed on failure too; lookups before a failed write were still spent
    println!("\n=== CREDIT USAGE SUMMARY ===");
    println!("{}", credits);

    Ok(())
}
