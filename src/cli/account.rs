//! Account CLI commands

use clap::Subcommand;

use crate::display::format_account_list;
use crate::error::{PayoffError, PayoffResult};
use crate::models::{AccountType, Money};
use crate::services::AccountService;
use crate::storage::Storage;

use super::parse_money_arg;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Add a new account
    Add {
        /// Account name
        name: String,
        /// Account type (checking, savings, depository, credit, line_of_credit, other)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Starting balance (e.g., "1000.00"; for credit cards, the amount owed)
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Annual interest rate as a decimal (e.g., 0.199), liability accounts only
        #[arg(short, long)]
        rate: Option<f64>,
        /// Minimum monthly payment, liability accounts only
        #[arg(short, long)]
        minimum: Option<String>,
    },
    /// List all accounts with balances
    List {
        /// Show archived accounts
        #[arg(short, long)]
        all: bool,
    },
}

/// Handle an account command
pub fn handle_account_command(storage: &Storage, cmd: AccountCommands) -> PayoffResult<()> {
    let service = AccountService::new(storage);

    match cmd {
        AccountCommands::Add {
            name,
            account_type,
            balance,
            rate,
            minimum,
        } => {
            let account_type = AccountType::parse(&account_type).ok_or_else(|| {
                PayoffError::Validation(format!(
                    "Invalid account type: '{}'. Valid types: checking, savings, depository, \
                     credit, line_of_credit, other",
                    account_type
                ))
            })?;

            let mut starting_balance = parse_money_arg(&balance)?;

            // Users naturally enter debt as a positive number; liability
            // balances are stored negative
            if account_type.is_liability() && starting_balance.is_positive() {
                starting_balance = -starting_balance;
            }

            let minimum_payment = minimum.as_deref().map(parse_money_arg).transpose()?;

            let account =
                service.create(&name, account_type, starting_balance, rate, minimum_payment)?;

            println!("Created account: {}", account.name);
            println!("  Type: {}", account.account_type);
            println!("  Starting Balance: {}", account.starting_balance);
            if let Some(rate) = account.interest_rate {
                println!("  Interest Rate: {:.1}%", rate * 100.0);
            }
            if let Some(min) = account.minimum_payment {
                println!("  Minimum Payment: {}", min);
            }
            println!("  ID: {}", account.id);
        }

        AccountCommands::List { all } => {
            let accounts = service.list(all)?;
            let mut rows: Vec<(crate::models::Account, Money)> = Vec::new();
            for account in accounts {
                let balance = service.balance(&account)?;
                rows.push((account, balance));
            }
            println!("{}", format_account_list(&rows));
        }
    }

    Ok(())
}
