//! Budget service
//!
//! Provides business logic for envelope budgets: creation, lookup, and the
//! budgeted/activity/available roll-up. Overspending a budget is allowed
//! and reported, never rejected; a negative available balance is the
//! envelope-budgeting "red category".

use crate::audit::EntityType;
use crate::error::{PayoffError, PayoffResult};
use crate::models::{AccountId, Budget, BudgetId, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

/// A budget with its computed activity and available balance
#[derive(Debug, Clone)]
pub struct BudgetSummary {
    pub budget: Budget,
    /// Sum of assigned transactions (negative means spending)
    pub activity: Money,
    /// budgeted + activity
    pub available: Money,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new budget, optionally linked to a credit account as its
    /// payment category
    pub fn create(
        &self,
        name: &str,
        linked_account_id: Option<AccountId>,
    ) -> PayoffResult<Budget> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PayoffError::Validation("Budget name cannot be empty".into()));
        }

        if self.storage.budgets.find_by_name(name)?.is_some() {
            return Err(PayoffError::Duplicate {
                entity_type: "Budget",
                identifier: name.to_string(),
            });
        }

        if let Some(account_id) = linked_account_id {
            let account = self
                .storage
                .accounts
                .get(account_id)?
                .ok_or_else(|| PayoffError::account_not_found(account_id.to_string()))?;
            if !account.account_type.is_liability() {
                return Err(PayoffError::Validation(format!(
                    "'{}' is not a credit account; only liability accounts take a payment category",
                    account.name
                )));
            }
        }

        let mut budget = Budget::new(name);
        budget.linked_account_id = linked_account_id;

        budget
            .validate()
            .map_err(|e| PayoffError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_create(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &budget,
        )?;

        Ok(budget)
    }

    /// Find a budget by name or ID string
    pub fn find(&self, identifier: &str) -> PayoffResult<Option<Budget>> {
        if let Some(budget) = self.storage.budgets.find_by_name(identifier)? {
            return Ok(Some(budget));
        }

        if let Ok(id) = identifier.parse::<BudgetId>() {
            return self.storage.budgets.get(id);
        }

        Ok(None)
    }

    /// Assign money to a budget (negative to unassign)
    pub fn assign(&self, budget_id: BudgetId, amount: Money) -> PayoffResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(budget_id)?
            .ok_or_else(|| PayoffError::budget_not_found(budget_id.to_string()))?;

        let before = budget.clone();
        budget.add_budgeted(amount);

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        self.storage.log_update(
            EntityType::Budget,
            budget.id.to_string(),
            Some(budget.name.clone()),
            &before,
            &budget,
            Some(format!(
                "budgeted: {} -> {}",
                before.budgeted, budget.budgeted
            )),
        )?;

        Ok(budget)
    }

    /// All budgets with computed activity and available balances
    pub fn list_with_balances(&self) -> PayoffResult<Vec<BudgetSummary>> {
        let budgets = self.storage.budgets.get_all()?;
        let mut summaries = Vec::with_capacity(budgets.len());

        for budget in budgets {
            summaries.push(self.summary(budget)?);
        }

        Ok(summaries)
    }

    /// Compute one budget's activity and available balance
    pub fn summary(&self, budget: Budget) -> PayoffResult<BudgetSummary> {
        let transactions = self.storage.transactions.get_by_budget(budget.id)?;
        let activity: Money = transactions.iter().map(|t| t.amount).sum();
        let available = budget.budgeted + activity;

        Ok(BudgetSummary {
            budget,
            activity,
            available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PayoffPaths;
    use crate::models::{Account, AccountType, Transaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayoffPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_and_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.create("Groceries", None).unwrap();
        assert_eq!(service.find("groceries").unwrap().unwrap().id, budget.id);
    }

    #[test]
    fn test_payment_category_requires_liability_account() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let checking = Account::new("Checking", AccountType::Checking);
        let checking_id = checking.id;
        storage.accounts.upsert(checking).unwrap();

        let result = service.create("Checking Payment", Some(checking_id));
        assert!(matches!(result, Err(PayoffError::Validation(_))));

        let card = Account::new("Visa", AccountType::Credit);
        let card_id = card.id;
        storage.accounts.upsert(card).unwrap();

        let budget = service.create("Visa Payment", Some(card_id)).unwrap();
        assert!(budget.is_payment_category());
    }

    #[test]
    fn test_overspending_is_reported_not_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let budget = service.create("Dining Out", None).unwrap();
        service.assign(budget.id, Money::from_cents(5_000)).unwrap();

        let account = Account::new("Checking", AccountType::Checking);
        let account_id = account.id;
        storage.accounts.upsert(account).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut txn = Transaction::new(account_id, date, Money::from_cents(-8_000));
        txn.budget_id = Some(budget.id);
        storage.transactions.upsert(txn).unwrap();

        let summary = service.summary(service.find("Dining Out").unwrap().unwrap()).unwrap();
        assert_eq!(summary.activity.cents(), -8_000);
        assert_eq!(summary.available.cents(), -3_000);
    }

    #[test]
    fn test_assign_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let result = service.assign(BudgetId::new(), Money::from_cents(100));
        assert!(matches!(result, Err(PayoffError::NotFound { .. })));
    }
}
