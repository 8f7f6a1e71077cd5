//! Item commands
//!
//! Usage: storagex item list | get <ID>

use super::print_json;
use clap::{Args, Subcommand};
use storagex_store::{DataSource, ItemRepository};

#[derive(Debug, Args)]
pub struct ItemArgs {
    #[command(subcommand)]
    pub command: ItemCommand,
}

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// List every item
    List,
    /// Show one item
    Get {
        /// Item identifier
        id: String,
    },
}

/// Execute item command
pub fn execute(args: ItemArgs, source: DataSource) -> Result<(), Box<dyn std::error::Error>> {
    let repo = ItemRepository::new(source)?;

    match args.command {
        ItemCommand::List => print_json(&repo.find_all()?),
        ItemCommand::Get { id } => match repo.find_by_id(id.as_str())? {
            Some(item) => print_json(&item),
            None => Err(format!("item {} not found", id).into()),
        },
    }
}
