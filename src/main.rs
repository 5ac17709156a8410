mod cli;

use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use colored::*;
use elig_lookup::{
    config::Config,
    error::{self, LookupError},
    storage::{self, lookup_with_deadline, EligibilityLookup, LookupQuery, SeedData},
    utils,
};
use std::{path::Path, sync::Arc, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("elig_lookup=debug,info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Init => {
            info!("Initializing...");
            initialize(&config)
        }

        Commands::Seed { file } => {
            info!("Seeding from {}", file.display());
            seed(&config, &file)
        }

        Commands::Lookup {
            subscriber,
            prefix,
            start,
            end,
            format,
            timeout_ms,
        } => {
            run_lookup(&config, subscriber, prefix, &start, &end, format, timeout_ms).await
        }

        Commands::Env { key } => show_env(&config, key.as_deref()),

        Commands::Stats { format } => show_stats(&config, format),
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn initialize(config: &Config) -> error::Result<()> {
    let db = storage::Database::new(&config.database)?;
    let counts = db.table_counts()?;
    println!("{}", "✓ Schema ready".green());
    println!("  Database:   {}", config.database.path);
    println!("  Pool size:  {}", config.database.pool_size);
    println!("  Subscribers: {}", counts.subscribers);
    Ok(())
}

fn seed(config: &Config, file: &Path) -> error::Result<()> {
    let data = SeedData::from_path(file)?;
    let db = storage::Database::new(&config.database)?;
    db.seed(&data)?;
    println!(
        "{} {} rows from {}",
        "✓ Seeded".green(),
        data.row_count(),
        file.display()
    );
    Ok(())
}

async fn run_lookup(
    config: &Config,
    subscriber: String,
    prefix: String,
    start: &str,
    end: &str,
    format: OutputFormat,
    timeout_ms: Option<u64>,
) -> error::Result<()> {
    let start = utils::parse_date(start)?;
    let end = utils::parse_date(end)?;

    let pool = storage::open_pool(&config.database)?;
    let lookup = Arc::new(EligibilityLookup::new(pool));
    let query = LookupQuery::new(subscriber, prefix, start, end);

    let rows = match timeout_ms.or(config.lookup.default_timeout_ms) {
        Some(ms) => lookup_with_deadline(lookup, query, Duration::from_millis(ms)).await?,
        None => tokio::task::spawn_blocking(move || {
            use storage::MemberAltIdLookup;
            lookup.lookup(&query.subscriber_id, &query.prefix, query.start, query.end)
        })
        .await
        .map_err(|e| LookupError::Other(anyhow::anyhow!("lookup task failed: {}", e)))??,
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", "=== Member Alternate Ids ===".cyan().bold());
    println!("Window: {}", utils::format_range(start, end));

    if rows.is_empty() {
        println!("{}", "No matching eligibility".yellow());
        return Ok(());
    }

    utils::print_table_border(40);
    utils::print_table_row(&["Alternate Id", "Group"], &[20, 15]);
    utils::print_table_border(40);
    for row in &rows {
        utils::print_table_row(&[&row.alternate_id, &row.group_id], &[20, 15]);
    }
    utils::print_table_border(40);
    println!("{} rows", rows.len().to_string().green());

    Ok(())
}

fn show_env(config: &Config, key: Option<&str>) -> error::Result<()> {
    match key {
        Some(key) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                return Err(LookupError::Config(format!("no environment property '{}'", key)));
            }
        },
        None => {
            for key in config.keys() {
                println!("{:<24} {}", key.cyan(), config.get(key).unwrap_or_default());
            }
        }
    }
    Ok(())
}

fn show_stats(config: &Config, format: OutputFormat) -> error::Result<()> {
    let db = storage::Database::new(&config.database)?;
    let counts = db.table_counts()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("{}", "=== Eligibility Tables ===".cyan().bold());
    println!("  Subscribers:          {}", counts.subscribers);
    println!("  Members:              {}", counts.members);
    println!("  Eligibility periods:  {}", counts.eligibility_periods);
    println!("  Care plans:           {}", counts.care_plans);
    Ok(())
}
