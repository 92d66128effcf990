//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entity was created
    Create,
    /// Entity was updated
    Update,
    /// Entity was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Account,
    Transaction,
    Budget,
    DebtPlan,
    BudgetTransfer,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Account => write!(f, "Account"),
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Budget => write!(f, "Budget"),
            EntityType::DebtPlan => write!(f, "DebtPlan"),
            EntityType::BudgetTransfer => write!(f, "BudgetTransfer"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// Type of entity affected
    pub entity_type: EntityType,

    /// Entity identifier
    pub entity_id: String,

    /// Human-readable entity name, if available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Entity state before the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    /// Entity state after the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    /// Optional note describing the change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AuditEntry {
    /// Build an entry for a create operation
    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        after: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            entity_type,
            entity_id,
            entity_name,
            before: None,
            after: serde_json::to_value(after).ok(),
            note: None,
        }
    }

    /// Build an entry for an update operation
    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        note: Option<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            entity_type,
            entity_id,
            entity_name,
            before: serde_json::to_value(before).ok(),
            after: serde_json::to_value(after).ok(),
            note,
        }
    }

    /// Build an entry for a delete operation
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            entity_type,
            entity_id,
            entity_name,
            before: serde_json::to_value(before).ok(),
            after: None,
            note: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(
            EntityType::BudgetTransfer,
            "tfr-12345678".to_string(),
            None,
            &serde_json::json!({"amount": 25000}),
        );

        assert_eq!(entry.operation, Operation::Create);
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_update_entry_carries_note() {
        let before = serde_json::json!({"progress": 10.0});
        let after = serde_json::json!({"progress": 25.0});
        let entry = AuditEntry::update(
            EntityType::DebtPlan,
            "pln-12345678".to_string(),
            Some("Snowball Payoff Plan".to_string()),
            &before,
            &after,
            Some("progress: 10 -> 25".to_string()),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.note.as_deref(), Some("progress: 10 -> 25"));
    }

    #[test]
    fn test_entry_serialization() {
        let entry = AuditEntry::delete(
            EntityType::DebtPlan,
            "pln-12345678".to_string(),
            None,
            &serde_json::json!({"title": "old plan"}),
        );

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.operation, Operation::Delete);
        assert_eq!(parsed.entity_type, EntityType::DebtPlan);
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(EntityType::BudgetTransfer.to_string(), "BudgetTransfer");
    }
}
