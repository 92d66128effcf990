//! Budget transfer repository for JSON storage
//!
//! Manages the append-only transfer ledger in transfers.json. Rows are
//! appended by the transfer engine and never updated; removal exists only
//! so a failed commit can be rolled back before anything was persisted.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PayoffError;
use crate::models::{BudgetTransfer, TransactionId, TransferId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transfer data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransferData {
    transfers: Vec<BudgetTransfer>,
}

/// Repository for the budget transfer ledger
pub struct TransferRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransferId, BudgetTransfer>>,
}

impl TransferRepository {
    /// Create a new transfer repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transfers from disk
    pub fn load(&self) -> Result<(), PayoffError> {
        let file_data: TransferData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for transfer in file_data.transfers {
            data.insert(transfer.id, transfer);
        }

        Ok(())
    }

    /// Save transfers to disk
    pub fn save(&self) -> Result<(), PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transfers: Vec<_> = data.values().cloned().collect();
        transfers.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        write_json_atomic(&self.path, &TransferData { transfers })
    }

    /// Get a transfer by ID
    pub fn get(&self, id: TransferId) -> Result<Option<BudgetTransfer>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all transfers, newest first
    pub fn get_all(&self) -> Result<Vec<BudgetTransfer>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transfers: Vec<_> = data.values().cloned().collect();
        transfers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(transfers)
    }

    /// Get transfers triggered by a transaction
    pub fn get_by_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<Vec<BudgetTransfer>, PayoffError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.transaction_id == Some(transaction_id))
            .collect())
    }

    /// Append a new transfer to the ledger
    pub fn append(&self, transfer: BudgetTransfer) -> Result<(), PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data.contains_key(&transfer.id) {
            return Err(PayoffError::Duplicate {
                entity_type: "BudgetTransfer",
                identifier: transfer.id.to_string(),
            });
        }

        data.insert(transfer.id, transfer);
        Ok(())
    }

    /// Remove a transfer that was never persisted (commit rollback only)
    pub fn remove(&self, id: TransferId) -> Result<bool, PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count transfers
    pub fn count(&self) -> Result<usize, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
