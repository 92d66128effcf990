//! Custom error types for payoff-cli
//!
//! This module defines the error hierarchy for the engine using thiserror.
//! The taxonomy distinguishes recoverable business-rule failures (no credit
//! card account, unpayable schedule) from validation failures and storage
//! failures, because callers react to each differently.

use thiserror::Error;

/// The main error type for payoff-cli operations
#[derive(Error, Debug)]
pub enum PayoffError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for inputs and data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// The amortization simulation cannot converge under the given payments
    #[error("Unpayable schedule: {0}")]
    UnpayableSchedule(String),

    /// A payment transfer was requested but no credit card account exists.
    /// Recoverable: the caller falls back to recording a plain transaction.
    #[error("No credit card account available for a payment transfer")]
    NoCreditCardAccount,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PayoffError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budgets
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for debt plans
    pub fn plan_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "DebtPlan",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error is recoverable by falling back to a plain
    /// (non-automated) transaction
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoCreditCardAccount)
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PayoffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PayoffError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for payoff-cli operations
pub type PayoffResult<T> = Result<T, PayoffError>;
