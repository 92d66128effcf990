//! Budget transfer ledger CLI commands

use clap::Subcommand;

use crate::display::format_transfer_list;
use crate::error::{PayoffError, PayoffResult};
use crate::models::TransactionId;
use crate::storage::Storage;

/// Transfer ledger subcommands
#[derive(Subcommand)]
pub enum TransferCommands {
    /// List budget transfers, newest first
    List {
        /// Only transfers triggered by this transaction ID
        #[arg(short, long)]
        transaction: Option<String>,
    },
}

/// Handle a transfers command
pub fn handle_transfers_command(storage: &Storage, cmd: TransferCommands) -> PayoffResult<()> {
    match cmd {
        TransferCommands::List { transaction } => {
            let transfers = match transaction {
                Some(id) => {
                    let id: TransactionId = id.parse().map_err(|_| {
                        PayoffError::Validation(format!("Invalid transaction ID: '{}'", id))
                    })?;
                    storage.transfers.get_by_transaction(id)?
                }
                None => storage.transfers.get_all()?,
            };

            println!("{}", format_transfer_list(&transfers));
        }
    }

    Ok(())
}
