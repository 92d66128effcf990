//! Budget transfer ledger model
//!
//! A BudgetTransfer records money moved between two envelope budgets. Rows
//! are append-only: created by the transfer engine, never mutated after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, TransactionId, TransferId};
use super::money::Money;

/// An audit record of money moved between two budget categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetTransfer {
    /// Unique identifier
    pub id: TransferId,

    /// Amount moved (positive)
    pub amount: Money,

    /// Human-readable reason, e.g. "Credit card payment automation"
    pub reason: String,

    /// Whether the transfer was created by automation rather than the user
    pub automated: bool,

    /// The budget debited
    pub from_budget: BudgetId,

    /// The budget credited
    pub to_budget: BudgetId,

    /// The transaction that triggered this transfer, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,

    /// When the transfer was created
    pub created_at: DateTime<Utc>,
}

impl BudgetTransfer {
    /// Create a new transfer record
    pub fn new(
        amount: Money,
        reason: impl Into<String>,
        automated: bool,
        from_budget: BudgetId,
        to_budget: BudgetId,
        transaction_id: Option<TransactionId>,
    ) -> Self {
        Self {
            id: TransferId::new(),
            amount,
            reason: reason.into(),
            automated,
            from_budget,
            to_budget,
            transaction_id,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for BudgetTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {} to {} ({})",
            self.amount, self.from_budget, self.to_budget, self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_transfer() {
        let from = BudgetId::new();
        let to = BudgetId::new();
        let txn = TransactionId::new();

        let transfer = BudgetTransfer::new(
            Money::from_cents(25_000),
            "Credit card payment automation",
            true,
            from,
            to,
            Some(txn),
        );

        assert_eq!(transfer.amount.cents(), 25_000);
        assert!(transfer.automated);
        assert_eq!(transfer.from_budget, from);
        assert_eq!(transfer.to_budget, to);
        assert_eq!(transfer.transaction_id, Some(txn));
    }

    #[test]
    fn test_serialization() {
        let transfer = BudgetTransfer::new(
            Money::from_cents(100),
            "manual move",
            false,
            BudgetId::new(),
            BudgetId::new(),
            None,
        );

        let json = serde_json::to_string(&transfer).unwrap();
        let deserialized: BudgetTransfer = serde_json::from_str(&json).unwrap();
        assert_eq!(transfer.id, deserialized.id);
        assert_eq!(transfer.reason, deserialized.reason);
        assert!(!json.contains("transaction_id"));
    }
}
