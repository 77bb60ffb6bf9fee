//! Example Store CLI - browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! store-cli catalog
//!
//! # Show one product
//! store-cli product 3
//!
//! # Add a product to the cart, then show the cart
//! store-cli add 3
//! store-cli cart
//!
//! # Empty the cart
//! store-cli clear
//! ```
//!
//! # Environment Variables
//!
//! - `STORE_API_URL` - Store root the catalog API lives under
//!   (default: `http://127.0.0.1:3000/hw/store`)
//! - `STORE_DATA_DIR` - Directory the cart is persisted in (default: `.store-data`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use example_store_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "store-cli")]
#[command(author, version, about = "Example Store CLI")]
struct Cli {
    /// Store root the catalog API is served under
    #[arg(
        long,
        global = true,
        env = "STORE_API_URL",
        default_value = "http://127.0.0.1:3000/hw/store"
    )]
    api_url: String,

    /// Directory the cart is persisted in
    #[arg(long, global = true, env = "STORE_DATA_DIR", default_value = ".store-data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product in the catalog
    Catalog,
    /// Show one product
    Product {
        /// Product ID
        id: ProductId,
    },
    /// Add one unit of a product to the cart
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove everything from the cart
    Clear,
    /// Show the cart
    Cart,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::open(&cli.api_url, &cli.data_dir)?;

    match cli.command {
        Commands::Catalog => commands::catalog::list(&store).await?,
        Commands::Product { id } => commands::catalog::show(&store, id).await?,
        Commands::Add { id } => commands::cart::add(&store, id).await?,
        Commands::Clear => commands::cart::clear(&store),
        Commands::Cart => commands::cart::show(&store),
    }
    Ok(())
}
