//! CLI administration tool for shorturl.
//!
//! Creates and resolves short links and runs database diagnostics without
//! going through the HTTP API. Uses the same shortening protocol and
//! storage adapter as the service.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Look up a short code
//! cargo run --bin admin -- resolve aB3xY9
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Create the `urls` table if absent
//! cargo run --bin admin -- db migrate
//!
//! # Show server version and row count
//! cargo run --bin admin -- db info
//! ```
//!
//! # Environment Variables
//!
//! `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` /
//! `DB_NAME` as for the service.

use shorturl::application::services::ShortenError;
use shorturl::config::Config;
use shorturl::infrastructure::persistence::MIGRATOR;
use shorturl::state::{AppState, DynLinkService};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create a short link
    Shorten {
        /// URL to shorten (must start with http:// or https://)
        url: String,
    },

    /// Print the original URL for a short code
    Resolve {
        /// 6-character short code
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Create the `urls` table if it does not exist
    Migrate,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Shorten { url } => {
            let state = AppState::from_pool(pool);
            shorten(&state.link_service, &url).await?
        }
        Commands::Resolve { code } => {
            let state = AppState::from_pool(pool);
            resolve(&state.link_service, &code).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Runs the shortening protocol once and prints the new code.
async fn shorten(service: &DynLinkService, url: &str) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    match service.shorten(url).await {
        Ok(link) => {
            println!("  URL:     {}", link.original_url.cyan());
            println!("  Code:    {}", link.short_code.bright_yellow().bold());
            println!("  ID:      {}", link.id.to_string().bright_black());
            println!(
                "  Created: {}",
                link.created_at
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
                    .bright_black()
            );
            println!();
            println!("{}", "✅ Short link created".green().bold());
            Ok(())
        }
        Err(ShortenError::Collision { code }) => {
            println!(
                "{}",
                format!("⚠️  Code {code} was taken concurrently, run the command again").yellow()
            );
            anyhow::bail!("short code collision")
        }
        Err(e) => Err(e).context("Failed to create short link"),
    }
}

/// Looks up a short code.
///
/// An unknown code is an error, so the process exits non-zero.
async fn resolve(service: &DynLinkService, code: &str) -> Result<()> {
    match service.resolve(code).await {
        Ok(original_url) => {
            println!("  {} → {}", code.bright_yellow(), original_url.cyan());
            Ok(())
        }
        Err(ShortenError::NotFound { .. }) => {
            println!("{}", format!("❌ Short code {code} not found").red());
            anyhow::bail!("short code {code} not found")
        }
        Err(e) => Err(e).context("Failed to resolve short code"),
    }
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Initializing database tables...".bright_blue());

            MIGRATOR
                .run(pool)
                .await
                .context("Failed to initialize database tables")?;

            println!("{}", "✅ Database tables ready".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await
                .context("Failed to count links (run `admin db migrate` first?)")?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Links:      {}",
                links_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
