//! Fieldhouse CLI - drive the storefront engine from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered
//! fieldhouse products --sport Running --category Footwear
//!
//! # Populate backend demo data
//! fieldhouse seed
//!
//! # Scripted demo order: add products by id, then check out
//! fieldhouse order --add 1 --add 1 --add 2
//! ```
//!
//! # Commands
//!
//! - `products` - Query the catalog and show the derived facets
//! - `seed` - Populate backend demo data and reload the catalog
//! - `order` - Add products to the cart and submit a checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fieldhouse")]
#[command(author, version, about = "Fieldhouse storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products {
        /// Free-text search query
        #[arg(short, long)]
        query: Option<String>,

        /// Restrict to a category (e.g., Footwear)
        #[arg(short, long)]
        category: Option<String>,

        /// Restrict to a sport (e.g., Running)
        #[arg(short, long)]
        sport: Option<String>,
    },
    /// Populate backend demo data
    Seed,
    /// Run a scripted demo order
    Order {
        /// Product id to add to the cart; repeat to add more units
        #[arg(short, long = "add", value_name = "ID")]
        add: Vec<i64>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing; default to info for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fieldhouse=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products {
            query,
            category,
            sport,
        } => commands::products::run(query, category, sport).await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Order { add } => commands::order::run(add).await?,
    }
    Ok(())
}
