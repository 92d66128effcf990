//! Credit-card payment CLI command
//!
//! Records a payment explicitly: the checking outflow leg, the card inflow
//! leg, and the budget transfer, committed as one unit by the transfer
//! engine.

use crate::error::{PayoffError, PayoffResult};
use crate::services::{AccountService, BudgetService, CardLeg, CheckingLeg, CreditCardTransferService};
use crate::storage::Storage;

use super::{parse_date_arg, parse_money_arg};

/// Handle the pay command
#[allow(clippy::too_many_arguments)]
pub fn handle_pay_command(
    storage: &Storage,
    amount: &str,
    from: &str,
    card: Option<&str>,
    budget: &str,
    date: Option<&str>,
    description: Option<String>,
) -> PayoffResult<()> {
    let accounts = AccountService::new(storage);
    let budgets = BudgetService::new(storage);
    let engine = CreditCardTransferService::new(storage);

    let from_account = accounts
        .find(from)?
        .ok_or_else(|| PayoffError::account_not_found(from))?;

    let card_account_id = match card {
        Some(card) => Some(
            accounts
                .find(card)?
                .ok_or_else(|| PayoffError::account_not_found(card))?
                .id,
        ),
        None => None,
    };

    let spending_budget = budgets
        .find(budget)?
        .ok_or_else(|| PayoffError::budget_not_found(budget))?;

    let amount = parse_money_arg(amount)?;
    if !amount.is_positive() {
        return Err(PayoffError::Validation(
            "Payment amount must be positive".into(),
        ));
    }

    let date = parse_date_arg(date)?;
    let description = description.unwrap_or_else(|| match card {
        Some(card) => format!("Payment to: {}", card),
        None => "Credit card payment".to_string(),
    });

    let result = engine.record_credit_card_transfer(
        CheckingLeg {
            account_id: from_account.id,
            date,
            amount: -amount,
            description: description.clone(),
            category: Some("Credit Card Payment".to_string()),
            budget_id: Some(spending_budget.id),
        },
        CardLeg {
            account_id: card_account_id,
            date,
            amount,
            description,
            category: Some("Credit Card Payment".to_string()),
            budget_id: None,
        },
    )?;

    println!("Recorded credit card payment:");
    println!("  Checking: {}", result.checking_transaction);
    println!("  Card:     {}", result.card_transaction);
    println!(
        "  Budget transfer: {} from '{}' ({})",
        result.transfer.amount, spending_budget.name, result.transfer.reason
    );

    Ok(())
}
