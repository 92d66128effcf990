//! Budget CLI commands

use clap::Subcommand;

use crate::display::format_budget_list;
use crate::error::{PayoffError, PayoffResult};
use crate::services::{AccountService, BudgetService};
use crate::storage::Storage;

use super::parse_money_arg;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Add a new envelope budget
    Add {
        /// Budget name
        name: String,
        /// Credit account this budget pays down (makes it a payment category)
        #[arg(short, long)]
        card: Option<String>,
    },
    /// Assign money to a budget (negative to unassign)
    Assign {
        /// Budget name or ID
        budget: String,
        /// Amount to assign (e.g., "250.00")
        amount: String,
    },
    /// List budgets with activity and available balances
    List,
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> PayoffResult<()> {
    let service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Add { name, card } => {
            let linked_account_id = match card {
                Some(card) => {
                    let account = AccountService::new(storage)
                        .find(&card)?
                        .ok_or_else(|| PayoffError::account_not_found(&card))?;
                    Some(account.id)
                }
                None => None,
            };

            let budget = service.create(&name, linked_account_id)?;

            println!("Created budget: {}", budget.name);
            if budget.is_payment_category() {
                println!("  Payment category linked to a credit account");
            }
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::Assign { budget, amount } => {
            let found = service
                .find(&budget)?
                .ok_or_else(|| PayoffError::budget_not_found(&budget))?;
            let amount = parse_money_arg(&amount)?;

            let updated = service.assign(found.id, amount)?;
            println!("Assigned {} to {}", amount, updated.name);
            println!("  Budgeted: {}", updated.budgeted);
        }

        BudgetCommands::List => {
            let summaries = service.list_with_balances()?;
            println!("{}", format_budget_list(&summaries));
        }
    }

    Ok(())
}
