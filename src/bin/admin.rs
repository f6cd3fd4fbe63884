//! CLI administration tool for utm-tracker.
//!
//! Covers the write path the HTTP tiers do not expose: creating slug
//! mappings (validated before they are stored), plus read-only inspection of
//! mappings, click counts and tracking records.
//!
//! # Usage
//!
//! ```bash
//! # Create a mapping (prompts for anything not given as a flag)
//! cargo run --bin admin -- mapping create --slug promo \
//!     --destination https://example.com/landing \
//!     --source newsletter --medium email --campaign spring
//!
//! # Show a mapping, its redirect URL and click count
//! cargo run --bin admin -- mapping show promo
//!
//! # Show an advanced tracking record
//! cargo run --bin admin -- tracking show Xq3...
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database settings as the tracking API (`DATABASE_URL` or `DB_*`).

use utm_tracker::application::services::{AdvancedTracker, ClickLogger, MappingService};
use utm_tracker::config;
use utm_tracker::domain::entities::{NewUrlMapping, UrlMapping, UtmParams};
use utm_tracker::infrastructure::persistence::{
    PgClickRepository, PgMappingRepository, PgTrackingRepository,
};
use utm_tracker::server::connect_pool;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing utm-tracker.
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
    /// Manage slug mappings
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },

    /// Inspect advanced tracking records
    Tracking {
        #[command(subcommand)]
        action: TrackingAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum MappingAction {
    /// Create a new slug mapping
    Create {
        #[arg(long)]
        slug: Option<String>,

        /// Absolute http(s) destination URL
        #[arg(short, long)]
        destination: Option<String>,

        /// utm_source value
        #[arg(long)]
        source: Option<String>,

        /// utm_medium value
        #[arg(long)]
        medium: Option<String>,

        /// utm_campaign value
        #[arg(long)]
        campaign: Option<String>,

        /// Expiry as RFC 3339 (default: one year from now)
        #[arg(long)]
        expires_at: Option<DateTime<Utc>>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a mapping with its composed redirect URL and click count
    Show { slug: String },
}

#[derive(Subcommand)]
enum TrackingAction {
    /// Show a tracking record by tracking id
    Show { tracking_id: String },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::Config::from_env()?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Mapping { action } => handle_mapping_action(action, &pool).await?,
        Commands::Tracking { action } => handle_tracking_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_mapping_action(action: MappingAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let service = MappingService::new(Arc::new(PgMappingRepository::new(pool.clone())));

    match action {
        MappingAction::Create {
            slug,
            destination,
            source,
            medium,
            campaign,
            expires_at,
            yes,
        } => {
            let new_mapping = NewUrlMapping {
                slug: prompt_required("Slug", slug)?,
                destination_url: prompt_required("Destination URL", destination)?,
                utm: UtmParams::new(
                    prompt_optional("utm_source", source, yes)?,
                    prompt_optional("utm_medium", medium, yes)?,
                    prompt_optional("utm_campaign", campaign, yes)?,
                ),
                expires_at,
            };

            create_mapping(&service, new_mapping, yes).await?;
        }
        MappingAction::Show { slug } => {
            let clicks = ClickLogger::new(Arc::new(PgClickRepository::new(pool)));
            show_mapping(&service, &clicks, &slug).await?;
        }
    }

    Ok(())
}

/// Creates a mapping after showing a preview and asking for confirmation.
///
/// Validation and the slug uniqueness check happen in [`MappingService`];
/// failures are printed and returned as errors.
async fn create_mapping(service: &MappingService, new_mapping: NewUrlMapping, yes: bool) -> Result<()> {
    println!("{}", "🔗 Create Mapping".bright_blue().bold());
    println!();
    println!("  Slug:        {}", new_mapping.slug.cyan());
    println!("  Destination: {}", new_mapping.destination_url.bright_white());
    for (key, value) in new_mapping.utm.query_pairs() {
        println!("  {:<12} {}", format!("{key}:"), value.bright_white());
    }
    match new_mapping.expires_at {
        Some(at) => println!("  Expires:     {}", at.to_rfc3339().bright_black()),
        None => println!("  Expires:     {}", "in one year".bright_black()),
    }
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Create this mapping?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let mapping = service
        .create_mapping(new_mapping)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create mapping: {}", e))?;

    println!("{}", "✅ Mapping created".green().bold());
    println!();
    print_mapping(&mapping);
    println!();

    Ok(())
}

async fn show_mapping(service: &MappingService, clicks: &ClickLogger, slug: &str) -> Result<()> {
    let mapping = service
        .get_mapping(slug)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let click_count = clicks
        .count_clicks(&mapping.slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count clicks: {}", e))?;

    println!("{}", "🔗 Mapping".bright_blue().bold());
    println!();
    print_mapping(&mapping);
    println!("  Clicks:      {}", click_count.to_string().bright_green().bold());
    println!();

    Ok(())
}

fn print_mapping(mapping: &UrlMapping) {
    let status = if mapping.is_resolvable_at(Utc::now()) {
        "ACTIVE".green()
    } else {
        "EXPIRED".red()
    };

    println!("  Slug:        {} {}", mapping.slug.cyan(), status);
    println!("  Destination: {}", mapping.destination_url.bright_white());
    println!("  Redirect:    {}", mapping.redirect_url().bright_yellow());
    println!(
        "  Created:     {}",
        mapping.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    if let Some(at) = mapping.expires_at {
        println!(
            "  Expires:     {}",
            at.format("%Y-%m-%d %H:%M").to_string().bright_black()
        );
    }
}

async fn handle_tracking_action(action: TrackingAction, pool: &PgPool) -> Result<()> {
    let tracker = AdvancedTracker::new(Arc::new(PgTrackingRepository::new(Arc::new(
        pool.clone(),
    ))));

    match action {
        TrackingAction::Show { tracking_id } => {
            let record = tracker
                .get_record(&tracking_id)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "🔎 Tracking Record".bright_blue().bold());
            println!();
            println!("  Tracking ID: {}", record.tracking_id.cyan());
            println!("  Slug:        {}", record.slug.bright_white());
            println!("  Network:     {}", record.ip_network.bright_white());
            println!("  Browser:     {}", record.browser_family);
            println!("  OS:          {}", record.os_family);
            println!("  Device:      {}", record.device_type);
            println!(
                "  First click: {}",
                record
                    .first_click_time
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
                    .bright_black()
            );
            println!(
                "  Clicks:      {}",
                record.click_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let service = MappingService::new(Arc::new(PgMappingRepository::new(Arc::new(
                pool.clone(),
            ))));
            service
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

fn prompt_required(prompt: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new().with_prompt(prompt).interact_text()?),
    }
}

/// Returns `value`, or asks for it unless prompts are skipped. Empty input is `None`.
fn prompt_optional(prompt: &str, value: Option<String>, skip_prompt: bool) -> Result<Option<String>> {
    if value.is_some() || skip_prompt {
        return Ok(value);
    }

    let input: String = Input::new()
        .with_prompt(format!("{prompt} (optional)"))
        .allow_empty(true)
        .interact_text()?;

    Ok(Some(input).filter(|v| !v.trim().is_empty()))
}
