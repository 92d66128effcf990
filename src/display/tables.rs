//! Table rendering for list views

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Account, BudgetTransfer, Money, Transaction};
use crate::services::BudgetSummary;

#[derive(Tabled)]
struct AccountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    account_type: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format accounts with their computed balances as a table
pub fn format_account_list(accounts: &[(Account, Money)]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let rows = accounts.iter().map(|(account, balance)| AccountRow {
        name: account.name.clone(),
        account_type: account.account_type.to_string(),
        balance: balance.to_string(),
        status: if account.archived {
            "Archived".to_string()
        } else {
            String::new()
        },
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Budget")]
    name: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Available")]
    available: String,
}

/// Format budgets with activity and available balances as a table.
/// Overspent budgets show a negative available balance.
pub fn format_budget_list(summaries: &[BudgetSummary]) -> String {
    if summaries.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows = summaries.iter().map(|s| BudgetRow {
        name: s.budget.name.clone(),
        budgeted: s.budget.budgeted.to_string(),
        activity: s.activity.to_string(),
        available: s.available.to_string(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format transactions as a table
pub fn format_transaction_list(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow {
        date: t.date.format("%Y-%m-%d").to_string(),
        description: t.description.clone(),
        category: t.category.clone().unwrap_or_default(),
        amount: t.amount.to_string(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Reason")]
    reason: String,
    #[tabled(rename = "Automated")]
    automated: String,
}

/// Format the budget transfer ledger as a table
pub fn format_transfer_list(transfers: &[BudgetTransfer]) -> String {
    if transfers.is_empty() {
        return "No transfers recorded.".to_string();
    }

    let rows = transfers.iter().map(|t| TransferRow {
        created: t.created_at.format("%Y-%m-%d").to_string(),
        amount: t.amount.to_string(),
        reason: t.reason.clone(),
        automated: if t.automated { "yes" } else { "no" }.to_string(),
    });

    Table::new(rows).with(Style::sharp()).to_string()
}
