//! CLI administration tool for hexlink.
//!
//! Works directly against the PostgreSQL store, without going through the
//! HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Create the urls table
//! cargo run --bin admin -- db init
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten https://example.com
//!
//! # Look up a short code
//! cargo run --bin admin -- resolve c984d0
//!
//! # View statistics
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or the `DB_*` components): PostgreSQL connection string

use hexlink::application::services::UrlService;
use hexlink::config::{self, Config, mask_connection_string};
use hexlink::error::AppError;
use hexlink::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing hexlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Shorten a URL and print its short path
    Shorten {
        /// URL to shorten; prompted for when omitted
        url: Option<String>,
    },

    /// Print the URL a short code redirects to
    Resolve {
        /// Six-character short code
        short: String,
    },

    /// Show statistics
    Stats,
}

/// Database subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Create the urls table if it does not exist
    Init {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Check database connectivity
    Check,
}

type Service = UrlService<PgUrlRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    if config.uses_memory_store() {
        anyhow::bail!("admin commands need a PostgreSQL DATABASE_URL, not memory://");
    }

    let service = connect(&config).await?;

    match cli.command {
        Commands::Db { action } => match action {
            DbAction::Init { yes } => db_init(&service, yes).await,
            DbAction::Check => db_check(&service, &config).await,
        },
        Commands::Shorten { url } => shorten(&service, url).await,
        Commands::Resolve { short } => resolve(&service, &short).await,
        Commands::Stats => stats(&service).await,
    }
}

async fn connect(config: &Config) -> Result<Service> {
    let repository = PgUrlRepository::connect(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to connect to database")?;

    Ok(UrlService::new(Arc::new(repository)))
}

async fn db_init(service: &Service, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Create the urls table if it is missing?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    service.initialize().await?;
    println!("{} Schema is ready", "✓".green().bold());

    Ok(())
}

async fn db_check(service: &Service, config: &Config) -> Result<()> {
    println!(
        "Database: {}",
        mask_connection_string(&config.database_url).cyan()
    );

    match service.count().await {
        Ok(count) => {
            println!("{} Connected, {} urls stored", "✓".green().bold(), count);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), e);
            Err(e.into())
        }
    }
}

async fn shorten(service: &Service, url: Option<String>) -> Result<()> {
    let original = match url {
        Some(url) => url,
        None => Input::<String>::new()
            .with_prompt("URL to shorten")
            .interact_text()?,
    };

    let mapping = service.shorten(&original).await?;

    println!("{} {}", mapping.short_path().green().bold(), mapping.original);

    Ok(())
}

async fn resolve(service: &Service, short: &str) -> Result<()> {
    match service.resolve(short).await {
        Ok(mapping) => {
            println!("{}", mapping.original);
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            anyhow::bail!("{} is not a known short code", short.yellow())
        }
        Err(e) => Err(e.into()),
    }
}

async fn stats(service: &Service) -> Result<()> {
    let count = service.count().await?;

    println!("{}", "Statistics".bold().underline());
    println!("  Stored URLs: {}", count.to_string().cyan());

    Ok(())
}
