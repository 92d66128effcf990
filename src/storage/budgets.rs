//! Budget repository for JSON storage
//!
//! Manages loading and saving envelope budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PayoffError;
use crate::models::{AccountId, Budget, BudgetId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), PayoffError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.name.cmp(&b.name));

        write_json_atomic(&self.path, &BudgetData { budgets })
    }

    /// Get a budget by ID
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all budgets, sorted by name
    pub fn get_all(&self) -> Result<Vec<Budget>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(budgets)
    }

    /// Find a budget by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Result<Option<Budget>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let needle = name.to_lowercase();
        Ok(data
            .values()
            .find(|b| b.name.to_lowercase() == needle)
            .cloned())
    }

    /// Find the payment category linked to a credit account
    pub fn find_by_linked_account(
        &self,
        account_id: AccountId,
    ) -> Result<Option<Budget>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|b| b.linked_account_id == Some(account_id))
            .cloned())
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(budget.id, budget);
        Ok(())
    }

    /// Delete a budget
    pub fn delete(&self, id: BudgetId) -> Result<bool, PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
