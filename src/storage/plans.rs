//! Debt plan repository for JSON storage
//!
//! Manages loading and saving payoff plans to plans.json. The repository
//! enforces the single-active-plan invariant: setting a new active plan
//! removes the previous one.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PayoffError;
use crate::models::{DebtPlan, DebtPlanId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable plan data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PlanData {
    plans: Vec<DebtPlan>,
}

/// Repository for debt plan persistence
pub struct PlanRepository {
    path: PathBuf,
    data: RwLock<HashMap<DebtPlanId, DebtPlan>>,
}

impl PlanRepository {
    /// Create a new plan repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load plans from disk
    pub fn load(&self) -> Result<(), PayoffError> {
        let file_data: PlanData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for plan in file_data.plans {
            data.insert(plan.id, plan);
        }

        Ok(())
    }

    /// Save plans to disk
    pub fn save(&self) -> Result<(), PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut plans: Vec<_> = data.values().cloned().collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        write_json_atomic(&self.path, &PlanData { plans })
    }

    /// Get a plan by ID
    pub fn get(&self, id: DebtPlanId) -> Result<Option<DebtPlan>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all plans, newest first
    pub fn get_all(&self) -> Result<Vec<DebtPlan>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut plans: Vec<_> = data.values().cloned().collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(plans)
    }

    /// Get the active plan, if any
    pub fn active(&self) -> Result<Option<DebtPlan>, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().find(|p| p.is_active()).cloned())
    }

    /// Set a new active plan, superseding any existing active plan.
    ///
    /// Replace-on-generate semantics: the prior active plan is removed, not
    /// archived. Completed and paused plans are untouched.
    pub fn set_active(&self, plan: DebtPlan) -> Result<(), PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.retain(|_, p| !p.is_active());
        data.insert(plan.id, plan);
        Ok(())
    }

    /// Insert or update a plan without touching others
    pub fn upsert(&self, plan: DebtPlan) -> Result<(), PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(plan.id, plan);
        Ok(())
    }

    /// Delete a plan
    pub fn delete(&self, id: DebtPlanId) -> Result<bool, PayoffError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count plans
    pub fn count(&self) -> Result<usize, PayoffError> {
        let data = self
            .data
            .read()
            .map_err(|e| PayoffError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
