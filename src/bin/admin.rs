//! CLI administration tool for urlsnip.
//!
//! Manages links directly in PostgreSQL, going through the same validation
//! and code generation as the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin urlsnip-admin -- links list
//!
//! # Create a link with a generated or custom code
//! cargo run --bin urlsnip-admin -- links create https://example.com/page
//! cargo run --bin urlsnip-admin -- links create https://example.com/page --code promo1
//!
//! # Show or delete a link
//! cargo run --bin urlsnip-admin -- links show promo1
//! cargo run --bin urlsnip-admin -- links delete promo1
//!
//! # Check database connection
//! cargo run --bin urlsnip-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server; `DATABASE_URL` (or the `DB_*`
//! components) is required. Pending migrations are applied before any
//! command runs, so a fresh database works without starting the server.

use urlsnip::application::services::{LinkService, LinkView};
use urlsnip::config::{self, Config, StorageBackend};
use urlsnip::infrastructure::persistence::{PgLinkRepository, TimeoutLinkRepository};
use urlsnip::server::{connect_pool, run_migrations};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

type AdminLinkService = LinkService<TimeoutLinkRepository<PgLinkRepository>>;

/// CLI tool for managing urlsnip.
#[derive(Parser)]
#[command(name = "urlsnip-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Create a short link
    Create {
        /// Destination URL
        url: String,

        /// Custom short code (6-8 letters or digits)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show a link and its click statistics
    Show { code: String },

    /// Delete a link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("urlsnip-admin only works with STORAGE_BACKEND=postgres");
    }
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = connect_pool(&config, database_url).await?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &config, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(TimeoutLinkRepository::new(
        PgLinkRepository::new(Arc::new(pool.clone())),
        config.store_timeout(),
    ));
    let service = LinkService::new(repo, &config.base_url, config.code_max_attempts);

    match action {
        LinkAction::List => list_links(&service).await?,
        LinkAction::Create { url, code } => create_link(&service, url, code).await?,
        LinkAction::Show { code } => show_link(&service, code).await?,
        LinkAction::Delete { code, yes } => delete_link(&service, code, yes).await?,
    }

    Ok(())
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code      Clicks  Created           URL
///   ───────────────────────────────────────────────────────────────
///   promo1    12      2026-01-15 10:30  https://example.com/page
/// ```
async fn list_links(service: &AdminLinkService) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} links create <url>",
            "urlsnip-admin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<7} {:<17} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for LinkView { link, .. } in &links {
        println!(
            "  {:<9} {:<7} {:<17} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn create_link(
    service: &AdminLinkService,
    url: String,
    code: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    let view = service
        .create_link(&url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!("  Code:      {}", view.link.code.cyan());
    println!("  Short URL: {}", view.short_url.bright_yellow().bold());
    println!("  Target:    {}", view.link.url);
    println!();

    Ok(())
}

async fn show_link(service: &AdminLinkService, code: String) -> Result<()> {
    let view = service
        .get_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let link = &view.link;

    println!("{}", "ℹ️  Link".bright_blue().bold());
    println!();
    println!("  Code:         {}", link.code.cyan());
    println!("  Short URL:    {}", view.short_url.bright_yellow());
    println!("  Target:       {}", link.url);
    println!(
        "  Clicks:       {}",
        link.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Last clicked: {}",
        link.last_clicked
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string())
            .bright_black()
    );
    println!(
        "  Created:      {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(
    service: &AdminLinkService,
    code: String,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let view = service
        .get_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:   {}", view.link.code.cyan());
    println!("  Target: {}", view.link.url);
    println!("  Clicks: {}", view.link.clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            PgLinkRepository::new(Arc::new(pool.clone()))
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}
