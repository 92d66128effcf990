//! Transaction model
//!
//! Represents financial transactions. Amounts are signed: negative is an
//! outflow, positive an inflow. A credit-card payment is a pair of linked
//! transactions (checking outflow, card inflow) joined by
//! `transfer_transaction_id`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, BudgetId, TransactionId};
use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Transaction date
    pub date: NaiveDate,

    /// Amount (positive for inflow, negative for outflow)
    pub amount: Money,

    /// Free-text description (payee line from a bank feed, or user-entered)
    #[serde(default)]
    pub description: String,

    /// Free-text category label from the bank feed or the user.
    /// The payment classifier matches against this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// The envelope budget this transaction is assigned to
    pub budget_id: Option<BudgetId>,

    /// If this is one leg of a payment transfer, the ID of the linked
    /// transaction in the other account
    pub transfer_transaction_id: Option<TransactionId>,

    /// Import ID for duplicate detection during CSV import
    pub import_id: Option<String>,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(account_id: AccountId, date: NaiveDate, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            account_id,
            date,
            amount,
            description: String::new(),
            category: None,
            budget_id: None,
            transfer_transaction_id: None,
            import_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transaction with all common fields
    pub fn with_details(
        account_id: AccountId,
        date: NaiveDate,
        amount: Money,
        description: impl Into<String>,
        category: Option<String>,
        budget_id: Option<BudgetId>,
    ) -> Self {
        let mut txn = Self::new(account_id, date, amount);
        txn.description = description.into();
        txn.category = category;
        txn.budget_id = budget_id;
        txn
    }

    /// Check if this is one leg of a payment transfer
    pub fn is_transfer(&self) -> bool {
        self.transfer_transaction_id.is_some()
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// Assign this transaction to a budget
    pub fn set_budget(&mut self, budget_id: Option<BudgetId>) {
        self.budget_id = budget_id;
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.len() > 200 {
            return Err(TransactionValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }

        Ok(())
    }

    /// Generate an import ID for duplicate detection
    pub fn generate_import_id(&self) -> String {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.date.hash(&mut hasher);
        self.amount.cents().hash(&mut hasher);
        self.description.hash(&mut hasher);
        format!("imp-{:016x}", hasher.finish())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    DescriptionTooLong(usize),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescriptionTooLong(len) => {
                write!(f, "Description too long ({} chars, max 200)", len)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let account_id = AccountId::new();
        let txn = Transaction::new(account_id, test_date(), Money::from_cents(-5000));
        assert_eq!(txn.account_id, account_id);
        assert_eq!(txn.date, test_date());
        assert_eq!(txn.amount.cents(), -5000);
        assert!(txn.budget_id.is_none());
        assert!(!txn.is_transfer());
    }

    #[test]
    fn test_inflow_outflow() {
        let account_id = AccountId::new();

        let inflow = Transaction::new(account_id, test_date(), Money::from_cents(1000));
        assert!(inflow.is_inflow());
        assert!(!inflow.is_outflow());

        let outflow = Transaction::new(account_id, test_date(), Money::from_cents(-1000));
        assert!(!outflow.is_inflow());
        assert!(outflow.is_outflow());
    }

    #[test]
    fn test_with_details() {
        let account_id = AccountId::new();
        let budget_id = BudgetId::new();
        let txn = Transaction::with_details(
            account_id,
            test_date(),
            Money::from_cents(-25000),
            "Payment to: Chase Sapphire",
            Some("Credit Card Payment".to_string()),
            Some(budget_id),
        );
        assert_eq!(txn.description, "Payment to: Chase Sapphire");
        assert_eq!(txn.category.as_deref(), Some("Credit Card Payment"));
        assert_eq!(txn.budget_id, Some(budget_id));
    }

    #[test]
    fn test_validation() {
        let account_id = AccountId::new();
        let mut txn = Transaction::new(account_id, test_date(), Money::from_cents(-100));
        assert!(txn.validate().is_ok());

        txn.description = "x".repeat(201);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::DescriptionTooLong(_))
        ));
    }

    #[test]
    fn test_import_id_generation() {
        let account_id = AccountId::new();
        let mut txn = Transaction::new(account_id, test_date(), Money::from_cents(-5000));
        txn.description = "Test Store".to_string();

        let import_id = txn.generate_import_id();
        assert!(import_id.starts_with("imp-"));

        // Same transaction should generate same import ID
        assert_eq!(import_id, txn.generate_import_id());
    }

    #[test]
    fn test_serialization() {
        let account_id = AccountId::new();
        let txn = Transaction::with_details(
            account_id,
            test_date(),
            Money::from_cents(-5000),
            "Test Store",
            None,
            None,
        );

        let json = serde_json::to_string(&txn).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn.id, deserialized.id);
        assert_eq!(txn.amount, deserialized.amount);
        assert_eq!(txn.description, deserialized.description);
    }

    #[test]
    fn test_display() {
        let account_id = AccountId::new();
        let mut txn = Transaction::new(account_id, test_date(), Money::from_cents(-5000));
        txn.description = "Test Store".to_string();

        assert_eq!(format!("{}", txn), "2025-01-15 Test Store -$50.00");
    }
}
