//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the service layer.

pub mod account;
pub mod budget;
pub mod pay;
pub mod plan;
pub mod transaction;
pub mod transfer;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use pay::handle_pay_command;
pub use plan::{handle_plan_command, PlanCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use transfer::{handle_transfers_command, TransferCommands};

use chrono::NaiveDate;

use crate::error::{PayoffError, PayoffResult};
use crate::models::Money;

/// Parse a money argument, with a CLI-friendly error
pub(crate) fn parse_money_arg(value: &str) -> PayoffResult<Money> {
    Money::parse(value).map_err(|e| {
        PayoffError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '100.00' or '100'. Error: {}",
            value, e
        ))
    })
}

/// Parse a YYYY-MM-DD date argument, defaulting to today
pub(crate) fn parse_date_arg(value: Option<&str>) -> PayoffResult<NaiveDate> {
    match value {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
            PayoffError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
        }),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
