mod inspect;
mod plan;
mod search;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pantry_core::{DatasetLocation, RecipeCatalog, Weekday, DEFAULT_TABLE};
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Pantry CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct DatasetArgs {
    /// Dataset file path or http(s) URL (CSV or JSON)
    #[arg(long, env = "PANTRY_DATASET")]
    dataset: String,
    /// Table to read from a multi-table JSON workbook
    #[arg(long, default_value = DEFAULT_TABLE)]
    table: String,
}

impl DatasetArgs {
    async fn load(&self) -> Result<RecipeCatalog> {
        let location = DatasetLocation::parse(&self.dataset);
        tracing::debug!(%location, table = %self.table, "Loading dataset");
        RecipeCatalog::load(&location, &self.table)
            .await
            .with_context(|| format!("Failed to load dataset from {}", location))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Ping the server (unauthenticated)
    Ping {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// Find recipes that use the given ingredients
    Search {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Ingredients to search for
        #[arg(required = true)]
        ingredients: Vec<String>,
        /// 1-indexed page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Results per page
        #[arg(long, default_value_t = 10)]
        page_size: usize,
        /// Include recipes that use only some of the ingredients
        #[arg(long)]
        partial: bool,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a shopping list for a weekly meal plan
    Plan {
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Day and recipe, e.g. --day Monday=Pancakes (repeatable)
        #[arg(long = "day", value_parser = plan::parse_day_entry)]
        days: Vec<(Weekday, String)>,
    },
    /// Summarize a dataset and report rows that failed to load
    Inspect {
        #[command(flatten)]
        dataset: DatasetArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ping { server } => {
            ping(&server).await?;
        }
        Commands::Search {
            dataset,
            ingredients,
            page,
            page_size,
            partial,
            json,
        } => {
            let catalog = dataset.load().await?;
            search::search(&catalog, &ingredients, page, page_size, partial, json)?;
        }
        Commands::Plan { dataset, days } => {
            let catalog = dataset.load().await?;
            plan::plan(&catalog, days);
        }
        Commands::Inspect { dataset } => {
            let catalog = dataset.load().await?;
            inspect::inspect(&catalog);
        }
    }

    Ok(())
}

#[derive(Deserialize)]
struct PingResponse {
    message: String,
}

async fn ping(server: &str) -> Result<()> {
    let url = format!("{}/api/test/unauthed-ping", server.trim_end_matches('/'));
    let response: PingResponse = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()?
        .json()
        .await?;

    println!("{}", response.message);

    Ok(())
}
