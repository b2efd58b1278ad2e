//! CLI binary for the civic portal search service.
//!
//! Prints JSON on stdout. All tracing output goes to stderr so stdout stays
//! machine-readable.

use std::path::PathBuf;

use civic_portal::{Portal, PortalConfig, SearchScope};
use civic_search::{SearchRequest, SortBy};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Civic portal: federated search over official, social and reference sources.
#[derive(Parser)]
#[command(name = "civic-portal", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Run one search and print the response.
    Search {
        /// Search query.
        query: String,

        /// Service to query: federated, local or live.
        #[arg(short, long, default_value = "federated")]
        scope: SearchScope,

        /// 1-based page number.
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Results per page.
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Exact category filter ("all" disables it).
        #[arg(long)]
        category: Option<String>,

        /// Sort key: relevance, date or category.
        #[arg(long, default_value = "relevance")]
        sort: SortBy,
    },

    /// Print query suggestions.
    Suggest {
        /// Partial query.
        query: String,

        /// Service to query: federated, local or live.
        #[arg(short, long, default_value = "federated")]
        scope: SearchScope,
    },

    /// List the categories of the local corpus.
    Categories,

    /// Write a default configuration file.
    InitConfig {
        /// Destination (defaults to the platform config path).
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("civic_portal=info,civic_search=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Search {
            query,
            scope,
            page,
            limit,
            category,
            sort,
        } => {
            let portal = Portal::new(&PortalConfig::load(cli.config.as_deref())?)?;
            let mut request = SearchRequest::new(query)
                .with_page(page)
                .with_limit(limit)
                .with_sort(sort);
            if let Some(category) = category {
                request = request.with_category(category);
            }
            let response = portal.search(scope, &request).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Suggest { query, scope } => {
            let portal = Portal::new(&PortalConfig::load(cli.config.as_deref())?)?;
            let suggestions = portal.suggestions(scope, &query).await;
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        }
        Command::Categories => {
            let portal = Portal::new(&PortalConfig::load(cli.config.as_deref())?)?;
            println!("{}", serde_json::to_string_pretty(&portal.local().categories())?);
        }
        Command::InitConfig { path } => {
            let path = path.unwrap_or_else(PortalConfig::default_config_path);
            PortalConfig::default().save_to_file(&path)?;
            tracing::info!(path = %path.display(), "configuration written");
        }
    }
    Ok(())
}
