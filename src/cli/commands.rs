use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "elig-lookup")]
#[command(about = "Member alternate-id lookup over subscriber eligibility tables")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional configuration file layered over config/default.toml
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the eligibility tables
    Init,

    /// Load a fixture dataset (TOML or JSON) into the tables
    Seed {
        /// Path to the fixture file
        file: PathBuf,
    },

    /// Look up alternate id and group for a subscriber
    Lookup {
        /// Subscriber identifier
        #[arg(short, long)]
        subscriber: String,

        /// Care-plan prefix
        #[arg(short, long)]
        prefix: String,

        /// Start of the date window (YYYY-MM-DD, inclusive)
        #[arg(long)]
        start: String,

        /// End of the date window (YYYY-MM-DD, inclusive)
        #[arg(long)]
        end: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Show environment properties
    Env {
        /// Print a single property
        key: Option<String>,
    },

    /// Show row counts per table
    Stats {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}
