//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json. Both legs
//! of a payment transfer live in this one file, so a single atomic write
//! persists them together.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::PayoffError;
use crate::models::{AccountId, BudgetId, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with indexing
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: account_id -> transaction_ids
    by_account: RwLock<HashMap<AccountId, Vec<TransactionId>>>,
    /// Index: budget_id -> transaction_ids
    by_budget: RwLock<HashMap<BudgetId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_account: RwLock::new(HashMap::new()),
            by_budget: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build indexes
    pub fn load(&self) -> Result<(), PayoffError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_account.clear();
        by_budget.clear();

        for txn in file_data.transactions {
            let id = txn.id;
            by_account.entry(txn.account_id).or_default().push(id);
            if let Some(budget_id) = txn.budget_id {
                by_budget.entry(budget_id).or_default().push(id);
            }
            data.insert(id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        write_json_atomic(&self.path, &TransactionData { transactions })
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    /// Get transactions for an account, newest first
    pub fn get_by_account(&self, account_id: AccountId) -> Result<Vec<Transaction>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_account = self
            .by_account
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_account
            .get(&account_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    /// Get transactions assigned to a budget, newest first
    pub fn get_by_budget(&self, budget_id: BudgetId) -> Result<Vec<Transaction>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_budget = self
            .by_budget
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_budget
            .get(&budget_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    /// Get transactions in a date range (inclusive)
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, PayoffError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove from old indexes if updating
        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_account.get_mut(&old.account_id) {
                ids.retain(|&id| id != txn.id);
            }
            if let Some(budget_id) = old.budget_id {
                if let Some(ids) = by_budget.get_mut(&budget_id) {
                    ids.retain(|&id| id != txn.id);
                }
            }
        }

        by_account.entry(txn.account_id).or_default().push(txn.id);
        if let Some(budget_id) = txn.budget_id {
            by_budget.entry(budget_id).or_default().push(txn.id);
        }

        data.insert(txn.id, txn);
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> Result<bool, PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_account = self
            .by_account
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(txn) = data.remove(&id) {
            if let Some(ids) = by_account.get_mut(&txn.account_id) {
                ids.retain(|&tid| tid != id);
            }
            if let Some(budget_id) = txn.budget_id {
                if let Some(ids) = by_budget.get_mut(&budget_id) {
                    ids.retain(|&tid| tid != id);
                }
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Find transaction by import ID
    pub fn find_by_import_id(&self, import_id: &str) -> Result<Option<Transaction>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|t| t.import_id.as_deref() == Some(import_id))
            .cloned())
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
