//! Debt snapshot model
//!
//! A Debt is one liability account frozen at plan-generation time: the
//! positive magnitude owed, the annual rate, and the minimum payment.
//! Snapshots do not track the live account balance afterwards; the plan's
//! total_debt stays what it was at creation.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::account::Account;
use super::ids::AccountId;
use super::money::Money;

/// A liability snapshot eligible for payoff planning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    /// The account this snapshot was taken from
    pub id: AccountId,

    /// Account name, used in plan steps and payment records
    pub account_name: String,

    /// Positive magnitude owed
    pub balance: Money,

    /// Annual interest rate as a decimal (e.g. 0.199); None when unknown
    pub interest_rate: Option<f64>,

    /// Minimum monthly payment
    pub minimum_payment: Money,
}

impl Debt {
    /// Snapshot a liability account with a negative current balance.
    ///
    /// Returns None for non-liability accounts and for liability accounts
    /// that are paid off or carry a credit (balance >= 0). The stored
    /// balance sign is flipped to a positive "owed" magnitude.
    pub fn from_account(account: &Account, current_balance: Money) -> Option<Self> {
        if !account.account_type.is_liability() || !current_balance.is_negative() {
            return None;
        }

        Some(Self {
            id: account.id,
            account_name: account.name.clone(),
            balance: -current_balance,
            interest_rate: account.interest_rate,
            minimum_payment: account.minimum_payment.unwrap_or_else(Money::zero),
        })
    }

    /// The annual rate, with a missing rate treated as zero
    pub fn rate_or_zero(&self) -> f64 {
        self.interest_rate.unwrap_or(0.0)
    }

    /// Validate the snapshot
    pub fn validate(&self) -> Result<(), DebtValidationError> {
        if self.account_name.trim().is_empty() {
            return Err(DebtValidationError::EmptyName);
        }

        if !self.balance.is_positive() {
            return Err(DebtValidationError::NonPositiveBalance(self.balance));
        }

        if self.minimum_payment.is_negative() {
            return Err(DebtValidationError::NegativeMinimumPayment(
                self.minimum_payment,
            ));
        }

        if let Some(rate) = self.interest_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(DebtValidationError::InvalidInterestRate(rate));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} owes {}", self.account_name, self.balance)
    }
}

/// Validation errors for debt snapshots
#[derive(Debug, Clone, PartialEq)]
pub enum DebtValidationError {
    EmptyName,
    NonPositiveBalance(Money),
    NegativeMinimumPayment(Money),
    InvalidInterestRate(f64),
}

impl fmt::Display for DebtValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Debt account name cannot be empty"),
            Self::NonPositiveBalance(b) => {
                write!(f, "Debt balance must be positive, got {}", b)
            }
            Self::NegativeMinimumPayment(m) => {
                write!(f, "Minimum payment cannot be negative, got {}", m)
            }
            Self::InvalidInterestRate(rate) => {
                write!(f, "Interest rate must be a non-negative decimal, got {}", rate)
            }
        }
    }
}

impl std::error::Error for DebtValidationError {}
