//! Operator CLI for the CMS frontend.
//!
//! Renders pages and inspects sites straight from the database, without
//! going through HTTP. Caching is always disabled so output reflects the
//! current database state.
//!
//! # Usage
//!
//! ```bash
//! # Render the page served for a host and path
//! cargo run --bin cmsctl -- render --host example.com --path /about
//!
//! # Render in a specific language
//! cargo run --bin cmsctl -- render --host example.com --path / --lang de
//!
//! # List active sites and their endpoints
//! cargo run --bin cmsctl -- sites
//!
//! # Check database connection
//! cargo run --bin cmsctl -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`cms_frontend::config`].

use cms_frontend::application::services::FrontendCache;
use cms_frontend::application::services::site_service::match_endpoint;
use cms_frontend::config;
use cms_frontend::domain::context::RequestContext;
use cms_frontend::domain::entities::Status;
use cms_frontend::domain::repositories::{SiteQuery, SortOrder, Store};
use cms_frontend::domain::repositories::query::COLUMN_NAME;
use cms_frontend::infrastructure::cache::NullCache;
use cms_frontend::infrastructure::persistence::PgStore;
use cms_frontend::server::{build_frontend, connect_pool};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for operating the CMS frontend.
#[derive(Parser)]
#[command(name = "cmsctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Render the page for a host and path and print the HTML
    Render {
        /// Request host, with port if the site endpoint includes one
        #[arg(long)]
        host: String,
        /// Request path
        #[arg(long, default_value = "/")]
        path: String,
        /// Render language (defaults to DEFAULT_LANGUAGE)
        #[arg(long)]
        lang: Option<String>,
    },

    /// List active sites and endpoints
    Sites {
        /// Show which site serves this `host/path`
        #[arg(long)]
        resolve: Option<String>,
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
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;
    let store = Arc::new(PgStore::new(Arc::new(pool)));

    match cli.command {
        Commands::Render { host, path, lang } => {
            let cache: Arc<FrontendCache> = Arc::new(NullCache::new());
            let frontend = build_frontend(&config, store.clone(), Some(store), cache);

            let language = lang.unwrap_or_else(|| config.default_language.clone());
            let ctx = RequestContext::new(host.to_ascii_lowercase(), path).with_language(language);

            println!("{}", frontend.render_by_host_and_path(&ctx).await);
        }
        Commands::Sites { resolve } => list_sites(store, resolve).await?,
        Commands::Db { action } => handle_db_action(action, store).await?,
    }

    Ok(())
}

/// Lists active sites with their endpoints.
///
/// # Output Format
///
/// ```text
/// 🌐 Active Sites
///
///   ID                   Name                 Endpoints
///   ──────────────────────────────────────────────────────────────
///   s1                   Main                 example.com, example.com/blog
/// ```
async fn list_sites(store: Arc<PgStore>, resolve: Option<String>) -> Result<()> {
    println!("{}", "🌐 Active Sites".bright_blue().bold());
    println!();

    let ctx = RequestContext::default();
    let query = SiteQuery::new()
        .status(Status::Active)
        .order_by(COLUMN_NAME, SortOrder::Asc);

    let sites = store
        .site_list(&ctx, query)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list sites: {}", e))?;

    if sites.is_empty() {
        println!("{}", "  No active sites found".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<20} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Endpoints".bright_white().bold()
    );
    println!("  {}", "─".repeat(62).bright_black());

    for site in &sites {
        println!(
            "  {:<20} {:<20} {}",
            site.id.bright_black(),
            site.name.cyan(),
            site.domain_names.join(", ")
        );
    }
    println!();

    if let Some(target) = resolve {
        match match_endpoint(&sites, &target.to_ascii_lowercase()) {
            Some(found) => println!(
                "  {} {} → site {} (endpoint {})",
                "✓".green(),
                target,
                found.site.id.cyan(),
                found.endpoint.bright_white()
            ),
            None => println!("  {} {} → no site", "✗".red(), target),
        }
        println!();
    }

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, store: Arc<PgStore>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(store.pool())
                .await
                .context("Database query failed")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  {}", version.bright_black());
        }
    }

    Ok(())
}
