use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use paperscreen::{assemble_rows, write_csv, ClientConfig, PubMedClient};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "paperscreen",
    about = "Fetch PubMed papers and filter non-academic authors",
    long_about = "Searches PubMed for a keyword, fetches article metadata and writes \
                  a CSV of authors whose affiliations look non-academic (commercial)."
)]
struct Cli {
    /// PubMed search term (example: "diabetes treatment")
    #[arg(short, long)]
    query: String,

    /// Filename to save the results to
    #[arg(short, long, default_value = "output.csv")]
    file: PathBuf,

    /// Print debug information during execution
    #[arg(short, long)]
    debug: bool,

    /// API key for NCBI E-utilities (raises the rate limit)
    #[arg(long, env = "NCBI_API_KEY")]
    api_key: Option<String>,

    /// Email for NCBI requests (recommended)
    #[arg(long, env = "NCBI_EMAIL")]
    email: Option<String>,

    /// Tool name for NCBI requests
    #[arg(long, env = "NCBI_TOOL", default_value = "paperscreen")]
    tool: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let client = create_client(&cli);

    info!(query = %cli.query, "searching PubMed");
    let ids = client.search_ids(&cli.query).await;
    if ids.is_empty() {
        warn!("no results found");
        return Ok(());
    }

    info!(papers = ids.len(), "found papers, fetching details");
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let articles = client.fetch_articles(&id_refs).await?;

    let rows = assemble_rows(&articles);
    write_csv(&rows, &cli.file)?;

    Ok(())
}

fn create_client(cli: &Cli) -> PubMedClient {
    let mut config = ClientConfig::new().with_tool(&cli.tool);

    if let Some(api_key) = &cli.api_key {
        config = config.with_api_key(api_key);
    }
    if let Some(email) = &cli.email {
        config = config.with_email(email);
    }

    PubMedClient::with_config(config)
}
