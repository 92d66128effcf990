//! Storage initialization
//!
//! Creates the data directory layout and seeds the starter envelope budgets
//! a fresh install begins with.

use crate::config::paths::PayoffPaths;
use crate::error::PayoffError;
use crate::models::Budget;

use super::Storage;

/// Names of the starter budgets seeded on first init
pub const STARTER_BUDGETS: [&str; 5] = [
    "Rent/Mortgage",
    "Groceries",
    "Utilities",
    "Dining Out",
    "Emergency Fund",
];

/// Initialize storage: create directories, data files, and starter budgets.
///
/// Idempotent: budgets are only seeded when none exist yet.
pub fn initialize_storage(paths: &PayoffPaths) -> Result<(), PayoffError> {
    paths.ensure_directories()?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    if storage.budgets.count()? == 0 {
        for name in STARTER_BUDGETS {
            storage.budgets.upsert(Budget::new(name))?;
        }
    }

    storage.save_all()?;
    Ok(())
}
