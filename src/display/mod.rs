//! Display formatting for terminal output
//!
//! Formats data models for terminal display: tables for list views and a
//! detail view for the active payoff plan.

pub mod plan;
pub mod tables;

pub use plan::format_plan;
pub use tables::{
    format_account_list, format_budget_list, format_transaction_list, format_transfer_list,
};
