//! Organization commands
//!
//! Usage: storagex organization list | get <ID> | delete <ID>

use super::print_json;
use clap::{Args, Subcommand};
use storagex_store::{DataSource, OrganizationRepository};

#[derive(Debug, Args)]
pub struct OrganizationArgs {
    #[command(subcommand)]
    pub command: OrganizationCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrganizationCommand {
    /// List every organization
    List,
    /// Show one organization
    Get {
        /// Organization identifier
        id: String,
    },
    /// Delete an organization without invoices
    Delete {
        /// Organization identifier
        id: String,
    },
}

/// Execute organization command
pub fn execute(args: OrganizationArgs, source: DataSource) -> Result<(), Box<dyn std::error::Error>> {
    let repo = OrganizationRepository::new(source)?;

    match args.command {
        OrganizationCommand::List => print_json(&repo.find_all()?),
        OrganizationCommand::Get { id } => match repo.find_by_id(id.as_str())? {
            Some(organization) => print_json(&organization),
            None => Err(format!("organization {} not found", id).into()),
        },
        OrganizationCommand::Delete { id } => {
            let deleted = repo.delete_by_id(id.as_str())?;
            print_json(&serde_json::json!({ "id": id, "deleted": deleted }))
        }
    }
}
