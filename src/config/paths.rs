//! Path management for payoff-cli
//!
//! Provides XDG-compliant path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `PAYOFF_CLI_DATA_DIR` environment variable (if set)
//! 2. Platform config directory via the `directories` crate
//!    (e.g. `~/.config/payoff-cli` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::PayoffError;

/// Manages all paths used by payoff-cli
#[derive(Debug, Clone)]
pub struct PayoffPaths {
    /// Base directory for all payoff-cli data
    base_dir: PathBuf,
}

impl PayoffPaths {
    /// Create a new PayoffPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PayoffError> {
        let base_dir = if let Ok(custom) = std::env::var("PAYOFF_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            let dirs = ProjectDirs::from("", "", "payoff-cli").ok_or_else(|| {
                PayoffError::Config("Could not determine a home directory".into())
            })?;
            dirs.config_dir().to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create PayoffPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to accounts.json
    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir().join("accounts.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to budgets.json (envelope categories)
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Get the path to plans.json (debt payoff plans)
    pub fn plans_file(&self) -> PathBuf {
        self.data_dir().join("plans.json")
    }

    /// Get the path to transfers.json (budget transfer ledger)
    pub fn transfers_file(&self) -> PathBuf {
        self.data_dir().join("transfers.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), PayoffError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PayoffError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PayoffError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if payoff-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
