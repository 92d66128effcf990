//! Account service
//!
//! Provides business logic for account management: creation, lookup,
//! computed balances, and the debt snapshots the plan generator consumes.

use crate::audit::EntityType;
use crate::error::{PayoffError, PayoffResult};
use crate::models::{Account, AccountId, AccountType, Debt, Money};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new account
    pub fn create(
        &self,
        name: &str,
        account_type: AccountType,
        starting_balance: Money,
        interest_rate: Option<f64>,
        minimum_payment: Option<Money>,
    ) -> PayoffResult<Account> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PayoffError::Validation("Account name cannot be empty".into()));
        }

        if self.storage.accounts.find_by_name(name)?.is_some() {
            return Err(PayoffError::Duplicate {
                entity_type: "Account",
                identifier: name.to_string(),
            });
        }

        let mut account = Account::with_starting_balance(name, account_type, starting_balance);
        account.interest_rate = interest_rate;
        account.minimum_payment = minimum_payment;

        account
            .validate()
            .map_err(|e| PayoffError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        self.storage.accounts.save()?;

        self.storage.log_create(
            EntityType::Account,
            account.id.to_string(),
            Some(account.name.clone()),
            &account,
        )?;

        Ok(account)
    }

    /// Get an account by ID
    pub fn get(&self, id: AccountId) -> PayoffResult<Option<Account>> {
        self.storage.accounts.get(id)
    }

    /// Find an account by name or ID string
    pub fn find(&self, identifier: &str) -> PayoffResult<Option<Account>> {
        if let Some(account) = self.storage.accounts.find_by_name(identifier)? {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return self.storage.accounts.get(id);
        }

        Ok(None)
    }

    /// Get all accounts, optionally including archived ones
    pub fn list(&self, include_archived: bool) -> PayoffResult<Vec<Account>> {
        let accounts = self.storage.accounts.get_all()?;
        if include_archived {
            Ok(accounts)
        } else {
            Ok(accounts.into_iter().filter(|a| !a.archived).collect())
        }
    }

    /// Current balance: starting balance plus the account's transactions
    pub fn balance(&self, account: &Account) -> PayoffResult<Money> {
        let transactions = self.storage.transactions.get_by_account(account.id)?;
        let activity: Money = transactions.iter().map(|t| t.amount).sum();
        Ok(account.starting_balance + activity)
    }

    /// Names of the user's liability accounts, for the payment classifier
    pub fn debt_account_names(&self) -> PayoffResult<Vec<String>> {
        Ok(self
            .list(false)?
            .into_iter()
            .filter(|a| a.account_type.is_liability())
            .map(|a| a.name)
            .collect())
    }

    /// Snapshot every liability account currently carrying debt.
    ///
    /// Balances are frozen at call time; the snapshots do not follow the
    /// live accounts afterwards.
    pub fn eligible_debts(&self) -> PayoffResult<Vec<Debt>> {
        let mut debts = Vec::new();
        for account in self.list(false)? {
            let balance = self.balance(&account)?;
            if let Some(debt) = Debt::from_account(&account, balance) {
                debts.push(debt);
            }
        }
        Ok(debts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PayoffPaths;
    use crate::models::Transaction;
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
        let service = AccountService::new(&storage);

        let account = service
            .create(
                "Visa",
                AccountType::Credit,
                Money::from_cents(-150_000),
                Some(0.199),
                Some(Money::from_cents(3_500)),
            )
            .unwrap();

        assert_eq!(service.find("visa").unwrap().unwrap().id, account.id);
        assert_eq!(
            service
                .find(&account.id.as_uuid().to_string())
                .unwrap()
                .unwrap()
                .id,
            account.id
        );
        assert!(service.find("amex").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        service
            .create("Visa", AccountType::Credit, Money::zero(), None, None)
            .unwrap();
        let result = service.create("visa", AccountType::Credit, Money::zero(), None, None);
        assert!(matches!(result, Err(PayoffError::Duplicate { .. })));
    }

    #[test]
    fn test_balance_includes_transactions() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        let account = service
            .create(
                "Checking",
                AccountType::Checking,
                Money::from_cents(100_000),
                None,
                None,
            )
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        storage
            .transactions
            .upsert(Transaction::new(account.id, date, Money::from_cents(-25_000)))
            .unwrap();

        assert_eq!(service.balance(&account).unwrap().cents(), 75_000);
    }

    #[test]
    fn test_eligible_debts_snapshot() {
        let (_temp_dir, storage) = create_test_storage();
        let service = AccountService::new(&storage);

        service
            .create(
                "Visa",
                AccountType::Credit,
                Money::from_cents(-150_000),
                Some(0.199),
                Some(Money::from_cents(3_500)),
            )
            .unwrap();
        // Paid-off card: not a debt
        service
            .create("Amex", AccountType::Credit, Money::zero(), Some(0.24), None)
            .unwrap();
        // Asset account: never a debt
        service
            .create(
                "Checking",
                AccountType::Checking,
                Money::from_cents(500_000),
                None,
                None,
            )
            .unwrap();

        let debts = service.eligible_debts().unwrap();
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].account_name, "Visa");
        assert_eq!(debts[0].balance.cents(), 150_000);

        let names = service.debt_account_names().unwrap();
        assert_eq!(names, vec!["Amex".to_string(), "Visa".to_string()]);
    }
}
