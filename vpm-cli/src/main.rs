//! VPM CLI - offline visual product search and catalog management.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use vpm_core::{DEFAULT_MIN_SCORE, DEFAULT_TOP_K};

mod commands;
mod exit_codes;
mod utils;

use exit_codes::ExitCode;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0   Success
  1   General error
  65  Invalid catalog data
  66  Cannot read catalog file
  69  Product database unavailable";

#[derive(Parser)]
#[command(name = "vpm")]
#[command(author, version, about = "Visual product search over a product catalog", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank catalog products against an image reference
    Search {
        /// Image reference (upload path or absolute URL)
        #[arg(value_name = "IMAGE_REF")]
        image_ref: String,

        /// Path to the JSON product catalog
        #[arg(short, long, env = "CATALOG_PATH", default_value = "data/products.json")]
        catalog: PathBuf,

        /// Read products from PostgreSQL instead of the catalog file
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Maximum number of results
        #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,

        /// Minimum score a result must reach (inclusive)
        #[arg(short, long, default_value_t = DEFAULT_MIN_SCORE, allow_negative_numbers = true)]
        min_score: f64,

        /// Print the response as JSON, in the same shape as POST /similarity
        #[arg(long)]
        json: bool,
    },

    /// List every catalog product with its seed score
    Products {
        /// Path to the JSON product catalog
        #[arg(short, long, env = "CATALOG_PATH", default_value = "data/products.json")]
        catalog: PathBuf,

        /// Read products from PostgreSQL instead of the catalog file
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a catalog file for duplicate ids, blank names and bad seed scores
    Validate {
        /// Path to the JSON product catalog
        #[arg(value_name = "CATALOG", env = "CATALOG_PATH", default_value = "data/products.json")]
        catalog: PathBuf,
    },

    /// Replace the products table in PostgreSQL with a catalog file
    Seed {
        /// Path to the JSON product catalog
        #[arg(short, long, env = "CATALOG_PATH", default_value = "data/products.json")]
        catalog: PathBuf,

        /// PostgreSQL connection string
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        /// Validate and report without touching the database
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "vpm=debug,vpm_core=debug,vpm_server=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Search {
            image_ref,
            catalog,
            database_url,
            top_k,
            min_score,
            json,
        } => {
            let source = utils::ProductSource::new(catalog, database_url);
            commands::search::execute(image_ref, source, top_k, min_score, json).await
        }
        Commands::Products {
            catalog,
            database_url,
            json,
        } => {
            let source = utils::ProductSource::new(catalog, database_url);
            commands::products::execute(source, json).await
        }
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Seed {
            catalog,
            database_url,
            dry_run,
        } => commands::seed::execute(catalog, database_url, dry_run).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let exit = ExitCode::from_anyhow(&err);
        if let Some(message) = &exit.message {
            eprintln!("{} {}", "error:".red().bold(), message);
        }
        std::process::exit(exit.code);
    }
}
