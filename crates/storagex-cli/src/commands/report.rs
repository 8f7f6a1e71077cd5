//! Report commands
//!
//! Usage:
//!   storagex report most-active [--limit N]
//!   storagex report items-above <ITEM_ID=VOLUME>...
//!   storagex report organization-items --from <DATE> --to <DATE>
//!   storagex report daily --from <DATE> --to <DATE>
//!   storagex report average-price --from <DATE> --to <DATE>

use super::print_json;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;
use storagex_core::model::{Item, Organization};
use storagex_engine::reports::DEFAULT_MOST_ACTIVE_LIMIT;
use storagex_engine::{InvoiceReports, OrganizationReports};
use storagex_store::{DataSource, InvoiceRepository, OrganizationRepository};

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

/// Half-open date range `[from, to)`
#[derive(Debug, Args)]
pub struct Period {
    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// First day excluded (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Organizations ranked by invoiced volume
    MostActive {
        #[arg(long, default_value_t = DEFAULT_MOST_ACTIVE_LIMIT)]
        limit: usize,
    },
    /// Organizations whose volume of each item exceeds a threshold
    ItemsAbove {
        /// Thresholds as ITEM_ID=VOLUME
        #[arg(required = true, value_parser = parse_threshold)]
        thresholds: Vec<(String, f64)>,
    },
    /// Items invoiced by each organization in a period
    OrganizationItems(Period),
    /// Daily amount and volume in a period
    Daily(Period),
    /// Average line price in a period
    AveragePrice(Period),
}

#[derive(Debug, Serialize)]
struct OrganizationItems {
    organization: Organization,
    items: Vec<Item>,
}

fn parse_threshold(raw: &str) -> Result<(String, f64), String> {
    let (item_id, volume) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM_ID=VOLUME, got '{}'", raw))?;
    let volume: f64 = volume
        .trim()
        .parse()
        .map_err(|_| format!("invalid volume '{}'", volume))?;
    if item_id.trim().is_empty() {
        return Err(format!("missing item id in '{}'", raw));
    }
    Ok((item_id.trim().to_string(), volume))
}

/// Execute report command
pub fn execute(args: ReportArgs, source: DataSource) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        ReportCommand::MostActive { limit } => {
            let reports = OrganizationReports::new(OrganizationRepository::new(source)?);
            print_json(&reports.most_active(limit)?)
        }
        ReportCommand::ItemsAbove { thresholds } => {
            let reports = OrganizationReports::new(OrganizationRepository::new(source)?);
            print_json(&reports.with_items_above(thresholds.as_slice())?)
        }
        ReportCommand::OrganizationItems(period) => {
            let reports = OrganizationReports::new(OrganizationRepository::new(source)?);
            let mut rows: Vec<OrganizationItems> = reports
                .with_items(period.from, period.to)?
                .into_iter()
                .map(|(organization, items)| {
                    let mut items: Vec<Item> = items.into_iter().collect();
                    items.sort_by(|a, b| a.id.cmp(&b.id));
                    OrganizationItems {
                        organization,
                        items,
                    }
                })
                .collect();
            rows.sort_by(|a, b| a.organization.id.cmp(&b.organization.id));
            print_json(&rows)
        }
        ReportCommand::Daily(period) => {
            let reports = invoice_reports(source)?;
            print_json(&reports.daily_summary(period.from, period.to)?)
        }
        ReportCommand::AveragePrice(period) => {
            let reports = invoice_reports(source)?;
            let average = reports.average_price(period.from, period.to)?;
            print_json(&serde_json::json!({ "average_price": average }))
        }
    }
}

fn invoice_reports(source: DataSource) -> storagex_store::Result<InvoiceReports> {
    let invoices = InvoiceRepository::new(source)?;
    let lines = invoices.sibling()?;
    Ok(InvoiceReports::new(invoices, lines))
}
