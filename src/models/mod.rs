//! Core data models for payoff-cli
//!
//! This module contains the data structures of the payoff domain: accounts,
//! transactions, envelope budgets, debt snapshots, payoff plans, and the
//! budget transfer ledger.

pub mod account;
pub mod budget;
pub mod debt;
pub mod ids;
pub mod money;
pub mod plan;
pub mod transaction;
pub mod transfer;

pub use account::{Account, AccountType};
pub use budget::Budget;
pub use debt::Debt;
pub use ids::{AccountId, BudgetId, DebtPlanId, PaymentId, TransactionId, TransferId};
pub use money::Money;
pub use plan::{DebtPlan, PaymentRecord, PlanStatus, Strategy, TrackingMode};
pub use transaction::Transaction;
pub use transfer::BudgetTransfer;
