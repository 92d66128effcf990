//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_transaction_list;
use crate::error::{PayoffError, PayoffResult};
use crate::services::{
    AccountService, AddOutcome, BudgetService, ColumnMapping, CreateTransactionInput, CsvImporter,
    KeywordClassifier, TransactionService,
};
use crate::storage::Storage;

use super::{parse_date_arg, parse_money_arg};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Account name or ID
        account: String,
        /// Amount (negative for outflow, e.g., "-42.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Description
        #[arg(short = 'D', long, default_value = "")]
        description: String,
        /// Category label
        #[arg(short, long)]
        category: Option<String>,
        /// Budget to assign the transaction to
        #[arg(short, long)]
        budget: Option<String>,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Skip credit-card payment automation for this transaction
        #[arg(long)]
        no_automation: bool,
    },
    /// List transactions
    List {
        /// Filter by account name or ID
        #[arg(short, long)]
        account: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Import transactions from a bank CSV export
    Import {
        /// Path to the CSV file
        file: String,
        /// Target account name or ID
        #[arg(short, long)]
        account: String,
        /// Use the credit-card export mapping (MM/DD/YYYY, inverted amounts)
        #[arg(long)]
        credit_card: bool,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> PayoffResult<()> {
    let accounts = AccountService::new(storage);
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            description,
            category,
            budget,
            date,
            no_automation,
        } => {
            let account = accounts
                .find(&account)?
                .ok_or_else(|| PayoffError::account_not_found(&account))?;

            let budget_id = match budget {
                Some(budget) => Some(
                    BudgetService::new(storage)
                        .find(&budget)?
                        .ok_or_else(|| PayoffError::budget_not_found(&budget))?
                        .id,
                ),
                None => None,
            };

            let input = CreateTransactionInput {
                account_id: account.id,
                date: parse_date_arg(date.as_deref())?,
                amount: parse_money_arg(&amount)?,
                description,
                category,
                budget_id,
            };

            if no_automation || !settings.automation_enabled {
                let txn = service.create(input)?;
                println!("Added transaction: {}", txn);
            } else {
                let classifier =
                    KeywordClassifier::with_extra_keywords(settings.extra_payment_keywords.clone());
                match service.add_with_automation(input, &classifier)? {
                    AddOutcome::Plain(txn) => {
                        println!("Added transaction: {}", txn);
                    }
                    AddOutcome::Automated(transfer) => {
                        println!("Recorded credit card payment:");
                        println!("  Checking: {}", transfer.checking_transaction);
                        println!("  Card:     {}", transfer.card_transaction);
                        println!(
                            "  Budget transfer: {} ({})",
                            transfer.transfer.amount, transfer.transfer.reason
                        );
                    }
                }
            }
        }

        TransactionCommands::List { account, limit } => {
            let account_id = match account {
                Some(account) => Some(
                    accounts
                        .find(&account)?
                        .ok_or_else(|| PayoffError::account_not_found(&account))?
                        .id,
                ),
                None => None,
            };

            let transactions = service.list(account_id, limit)?;
            println!("{}", format_transaction_list(&transactions));
        }

        TransactionCommands::Import {
            file,
            account,
            credit_card,
        } => {
            let account = accounts
                .find(&account)?
                .ok_or_else(|| PayoffError::account_not_found(&account))?;

            let mapping = if credit_card {
                ColumnMapping::credit_card()
            } else {
                ColumnMapping::default()
            };

            let summary =
                CsvImporter::new(storage).import_file(account.id, file.as_ref(), &mapping)?;

            println!("Imported {} transactions into {}", summary.imported, account.name);
            if summary.skipped_duplicates > 0 {
                println!("  Skipped {} duplicates", summary.skipped_duplicates);
            }
            if summary.failed > 0 {
                println!("  Skipped {} malformed rows", summary.failed);
            }
        }
    }

    Ok(())
}
