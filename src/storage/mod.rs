//! Storage layer for payoff-cli
//!
//! Provides JSON file storage with atomic writes and in-memory repositories,
//! one data file per entity type. The audit logger hangs off the storage
//! coordinator so services can record every mutation.

pub mod accounts;
pub mod budgets;
pub mod file_io;
pub mod init;
pub mod plans;
pub mod transactions;
pub mod transfers;

pub use accounts::AccountRepository;
pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use plans::PlanRepository;
pub use transactions::TransactionRepository;
pub use transfers::TransferRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::PayoffPaths;
use crate::error::PayoffError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PayoffPaths,
    pub accounts: AccountRepository,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
    pub plans: PlanRepository,
    pub transfers: TransferRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PayoffPaths) -> Result<Self, PayoffError> {
        paths.ensure_directories()?;

        Ok(Self {
            accounts: AccountRepository::new(paths.accounts_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            plans: PlanRepository::new(paths.plans_file()),
            transfers: TransferRepository::new(paths.transfers_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &PayoffPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PayoffError> {
        self.accounts.load()?;
        self.transactions.load()?;
        self.budgets.load()?;
        self.plans.load()?;
        self.transfers.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PayoffError> {
        self.accounts.save()?;
        self.transactions.save()?;
        self.budgets.save()?;
        self.plans.save()?;
        self.transfers.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        after: &T,
    ) -> Result<(), PayoffError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, after))
    }

    /// Record an update operation in the audit log
    #[allow(clippy::too_many_arguments)]
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        note: Option<String>,
    ) -> Result<(), PayoffError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            note,
        ))
    }

    /// Record a delete operation in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
    ) -> Result<(), PayoffError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, before))
    }
}
