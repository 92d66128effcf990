//! Account repository for JSON storage
//!
//! Manages loading and saving accounts to accounts.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PayoffError;
use crate::models::{Account, AccountId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable account data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct AccountData {
    accounts: Vec<Account>,
}

/// Repository for account persistence
pub struct AccountRepository {
    path: PathBuf,
    data: RwLock<HashMap<AccountId, Account>>,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load accounts from disk
    pub fn load(&self) -> Result<(), PayoffError> {
        let file_data: AccountData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for account in file_data.accounts {
            data.insert(account.id, account);
        }

        Ok(())
    }

    /// Save accounts to disk
    pub fn save(&self) -> Result<(), PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));

        write_json_atomic(&self.path, &AccountData { accounts })
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> Result<Option<Account>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all accounts, sorted by name
    pub fn get_all(&self) -> Result<Vec<Account>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut accounts: Vec<_> = data.values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(accounts)
    }

    /// Find an account by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Result<Option<Account>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let needle = name.to_lowercase();
        Ok(data
            .values()
            .find(|a| a.name.to_lowercase() == needle)
            .cloned())
    }

    /// Insert or update an account
    pub fn upsert(&self, account: Account) -> Result<(), PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(account.id, account);
        Ok(())
    }

    /// Delete an account
    pub fn delete(&self, id: AccountId) -> Result<bool, PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count accounts
    pub fn count(&self) -> Result<usize, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
