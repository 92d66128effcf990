//! Budget (envelope category) model
//!
//! A Budget is one envelope: money assigned to a purpose. A budget linked
//! to a credit-card account is that card's payment category, the
//! destination of automated payment transfers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, BudgetId};
use super::money::Money;

/// An envelope budget category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Budget name (e.g., "Groceries", "Chase Sapphire Payment")
    pub name: String,

    /// Amount currently assigned to this envelope
    pub budgeted: Money,

    /// For a card payment category: the credit account it pays down
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_account_id: Option<AccountId>,

    /// Notes about this budget
    #[serde(default)]
    pub notes: String,

    /// When the budget was created
    pub created_at: DateTime<Utc>,

    /// When the budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(),
            name: name.into(),
            budgeted: Money::zero(),
            linked_account_id: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a payment category linked to a credit account
    pub fn payment_category(name: impl Into<String>, account_id: AccountId) -> Self {
        let mut budget = Self::new(name);
        budget.linked_account_id = Some(account_id);
        budget
    }

    /// Whether this budget is a card payment category
    pub fn is_payment_category(&self) -> bool {
        self.linked_account_id.is_some()
    }

    /// Set the assigned amount
    pub fn set_budgeted(&mut self, amount: Money) {
        self.budgeted = amount;
        self.updated_at = Utc::now();
    }

    /// Add to the assigned amount (negative to remove)
    pub fn add_budgeted(&mut self, amount: Money) {
        self.budgeted += amount;
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(BudgetValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.budgeted)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Budget name too long ({} chars, max 100)", len),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let budget = Budget::new("Groceries");
        assert_eq!(budget.name, "Groceries");
        assert_eq!(budget.budgeted, Money::zero());
        assert!(!budget.is_payment_category());
    }

    #[test]
    fn test_payment_category() {
        let account_id = AccountId::new();
        let budget = Budget::payment_category("Visa Payment", account_id);
        assert!(budget.is_payment_category());
        assert_eq!(budget.linked_account_id, Some(account_id));
    }

    #[test]
    fn test_budgeted_adjustments() {
        let mut budget = Budget::new("Dining Out");
        budget.set_budgeted(Money::from_cents(20_000));
        assert_eq!(budget.budgeted.cents(), 20_000);

        budget.add_budgeted(Money::from_cents(-5_000));
        assert_eq!(budget.budgeted.cents(), 15_000);
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new("Valid");
        assert!(budget.validate().is_ok());

        budget.name = "  ".to_string();
        assert_eq!(budget.validate(), Err(BudgetValidationError::EmptyName));
    }

    #[test]
    fn test_serialization() {
        let budget = Budget::payment_category("Visa Payment", AccountId::new());
        let json = serde_json::to_string(&budget).unwrap();
        let deserialized: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(budget.id, deserialized.id);
        assert_eq!(budget.linked_account_id, deserialized.linked_account_id);
    }
}
