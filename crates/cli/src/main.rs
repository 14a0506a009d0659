use anyhow::Result;
use clap::{Parser, Subcommand};
use grove_core::{DEFAULT_SEARCH_LIMIT, PG_POOL_MAX_CONNECTIONS, env_parse_with_default};
use grove_storage::StorageBackend;
use grove_taxon::{GbifClient, TaxonClientConfig};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "grove")]
#[command(about = "Species search and resolution for the tree catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Search species (external source, local fallback)
    Search {
        query: String,
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },
    /// Resolve a scientific name to its canonical row, creating it if needed
    Resolve {
        scientific_name: String,
        #[arg(short, long)]
        common_name: Option<String>,
    },
    /// Get a canonical species by id
    Get { id: String },
    /// List all canonical species
    List,
    /// Resolve a tree's species reference (id or name)
    Link { reference: String },
}

/// Store selected by `DATABASE_URL`; in-memory when unset.
pub(crate) async fn open_store() -> Result<Arc<StorageBackend>> {
    let backend = match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => {
            let max = env_parse_with_default("GROVE_PG_MAX_CONNECTIONS", PG_POOL_MAX_CONNECTIONS);
            StorageBackend::new_postgres(url.trim(), max).await?
        },
        _ => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data is not persisted)");
            StorageBackend::new_memory()
        },
    };
    tracing::info!(backend = backend.kind(), "storage ready");
    Ok(Arc::new(backend))
}

pub(crate) fn taxon_client() -> Result<Arc<GbifClient>> {
    let config = TaxonClientConfig::from_env();
    tracing::debug!(base_url = %config.base_url, "taxon source configured");
    Ok(Arc::new(GbifClient::new(&config)?))
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Search { query, limit } => commands::species::run_search(&query, limit).await,
        Commands::Resolve { scientific_name, common_name } => {
            commands::species::run_resolve(&scientific_name, common_name.as_deref()).await
        },
        Commands::Get { id } => commands::species::run_get(&id).await,
        Commands::List => commands::species::run_list().await,
        Commands::Link { reference } => commands::species::run_link(&reference).await,
    }
}
