//! User settings for payoff-cli
//!
//! Manages user preferences: currency formatting, the default payoff
//! strategy, and the payment-automation switches.

use serde::{Deserialize, Serialize};

use super::paths::PayoffPaths;
use crate::error::PayoffError;
use crate::models::plan::Strategy;

/// User settings for payoff-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default payoff strategy for `plan generate`
    #[serde(default)]
    pub default_strategy: Strategy,

    /// Whether `txn add` routes classified payments through the transfer engine
    #[serde(default = "default_automation_enabled")]
    pub automation_enabled: bool,

    /// Extra keywords the payment classifier matches against descriptions,
    /// in addition to the built-in set
    #[serde(default)]
    pub extra_payment_keywords: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_automation_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_strategy: Strategy::default(),
            automation_enabled: default_automation_enabled(),
            extra_payment_keywords: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PayoffPaths) -> Result<Self, PayoffError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PayoffError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| PayoffError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PayoffPaths) -> Result<(), PayoffError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PayoffError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| PayoffError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
