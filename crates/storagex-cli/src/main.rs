//! StorageX CLI
//!
//! Command-line access to the invoicing database: record lookups and reports

use clap::{Parser, Subcommand};
use storagex_core::logging_facility::{self, Profile};
use storagex_store::db::{DataSource, ENV_DB_URL};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "storagex")]
#[command(about = "StorageX - Invoicing records and reports", long_about = None)]
struct Cli {
    /// Database URL or path (sqlite:<path> accepted)
    #[arg(long, global = true, env = "STORAGEX_DB_URL")]
    db: Option<String>,

    /// Emit JSON logs to stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Emit human-readable debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Organization records
    Organization(commands::organization::OrganizationArgs),
    /// Item records
    Item(commands::item::ItemArgs),
    /// Aggregate reports
    Report(commands::report::ReportArgs),
}

fn data_source(db: Option<String>) -> storagex_store::Result<DataSource> {
    DataSource::from_lookup(|key| match key {
        ENV_DB_URL => db.clone(),
        _ => std::env::var(key).ok(),
    })
}

fn main() {
    // Load .env before parsing so clap's env fallback sees it
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.log_json {
        logging_facility::init(Profile::Production);
    } else if cli.verbose {
        logging_facility::init(Profile::Development);
    }

    let result = data_source(cli.db)
        .map_err(|e| -> Box<dyn std::error::Error> { Box::new(e) })
        .and_then(|source| match cli.command {
            Commands::Organization(args) => commands::organization::execute(args, source),
            Commands::Item(args) => commands::item::execute(args, source),
            Commands::Report(args) => commands::report::execute(args, source),
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
