//! Account model
//!
//! Represents financial accounts (checking, depository, credit cards, etc.).
//! Liability accounts carry the interest rate and minimum payment used when
//! a payoff plan snapshots them as debts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Checking account
    Checking,
    /// Savings account
    Savings,
    /// Generic depository account (bank-sync feeds use this for cash accounts)
    Depository,
    /// Credit card
    Credit,
    /// Line of credit
    LineOfCredit,
    /// Other account type
    Other,
}

impl AccountType {
    /// Returns true for accounts that carry debt (credit cards, lines of credit)
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::Credit | Self::LineOfCredit)
    }

    /// Returns true for accounts a credit-card payment can be drawn from
    /// (checking or generic depository; savings does not qualify)
    pub fn is_payment_source(&self) -> bool {
        matches!(self, Self::Checking | Self::Depository)
    }

    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "depository" => Some(Self::Depository),
            "credit" | "credit_card" | "creditcard" => Some(Self::Credit),
            "line_of_credit" | "lineofcredit" | "loc" => Some(Self::LineOfCredit),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Default for AccountType {
    fn default() -> Self {
        Self::Checking
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Savings => write!(f, "Savings"),
            Self::Depository => write!(f, "Depository"),
            Self::Credit => write!(f, "Credit Card"),
            Self::LineOfCredit => write!(f, "Line of Credit"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Chase Sapphire")
    pub name: String,

    /// Type of account
    #[serde(rename = "type")]
    pub account_type: AccountType,

    /// Balance when the account was created. The current balance is this
    /// plus the sum of the account's transactions; for liability accounts
    /// a negative current balance is money owed.
    pub starting_balance: Money,

    /// Annual interest rate as a decimal (e.g. 0.199), liability accounts only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,

    /// Minimum monthly payment, liability accounts only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_payment: Option<Money>,

    /// Whether this account is archived (soft-deleted)
    #[serde(default)]
    pub archived: bool,

    /// Notes about this account
    #[serde(default)]
    pub notes: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with default values
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name: name.into(),
            account_type,
            starting_balance: Money::zero(),
            interest_rate: None,
            minimum_payment: None,
            archived: false,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account with a starting balance
    pub fn with_starting_balance(
        name: impl Into<String>,
        account_type: AccountType,
        starting_balance: Money,
    ) -> Self {
        let mut account = Self::new(name, account_type);
        account.starting_balance = starting_balance;
        account
    }

    /// Set liability terms (interest rate and minimum payment)
    pub fn set_terms(&mut self, interest_rate: Option<f64>, minimum_payment: Option<Money>) {
        self.interest_rate = interest_rate;
        self.minimum_payment = minimum_payment;
        self.updated_at = Utc::now();
    }

    /// Mark this account as archived
    pub fn archive(&mut self) {
        self.archived = true;
        self.updated_at = Utc::now();
    }

    /// Unarchive this account
    pub fn unarchive(&mut self) {
        self.archived = false;
        self.updated_at = Utc::now();
    }

    /// Validate the account
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        if self.name.trim().is_empty() {
            return Err(AccountValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(AccountValidationError::NameTooLong(self.name.len()));
        }

        if let Some(rate) = self.interest_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(AccountValidationError::InvalidInterestRate(rate));
            }
        }

        if let Some(min) = self.minimum_payment {
            if min.is_negative() {
                return Err(AccountValidationError::NegativeMinimumPayment(min));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

/// Validation errors for accounts
#[derive(Debug, Clone, PartialEq)]
pub enum AccountValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidInterestRate(f64),
    NegativeMinimumPayment(Money),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Account name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Account name too long ({} chars, max 100)", len)
            }
            Self::InvalidInterestRate(rate) => {
                write!(f, "Interest rate must be a non-negative decimal, got {}", rate)
            }
            Self::NegativeMinimumPayment(min) => {
                write!(f, "Minimum payment cannot be negative, got {}", min)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}
