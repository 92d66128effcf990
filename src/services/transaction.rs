//! Transaction service
//!
//! Creates and lists transactions. At creation time the payment classifier
//! runs over the draft; a classified credit-card payment is routed through
//! the transfer engine, and the recoverable no-credit-card case falls back
//! to recording a plain transaction.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::audit::EntityType;
use crate::error::{PayoffError, PayoffResult};
use crate::models::{AccountId, BudgetId, Money, Transaction};
use crate::storage::Storage;

use super::account::AccountService;
use super::classifier::PaymentClassifier;
use super::transfer_engine::{CardLeg, CheckingLeg, CreditCardTransfer, CreditCardTransferService};

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub account_id: AccountId,
    pub date: NaiveDate,
    pub amount: Money,
    pub description: String,
    pub category: Option<String>,
    pub budget_id: Option<BudgetId>,
}

/// What `add_with_automation` ended up recording
#[derive(Debug)]
pub enum AddOutcome {
    /// A single plain transaction
    Plain(Transaction),
    /// A classified payment routed through the transfer engine
    Automated(Box<CreditCardTransfer>),
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a plain transaction
    pub fn create(&self, input: CreateTransactionInput) -> PayoffResult<Transaction> {
        let account = self
            .storage
            .accounts
            .get(input.account_id)?
            .ok_or_else(|| PayoffError::account_not_found(input.account_id.to_string()))?;

        if account.archived {
            return Err(PayoffError::Validation(
                "Cannot add transactions to an archived account".into(),
            ));
        }

        if let Some(budget_id) = input.budget_id {
            self.storage
                .budgets
                .get(budget_id)?
                .ok_or_else(|| PayoffError::budget_not_found(budget_id.to_string()))?;
        }

        let txn = Transaction::with_details(
            input.account_id,
            input.date,
            input.amount,
            input.description.trim(),
            input.category,
            input.budget_id,
        );

        txn.validate()
            .map_err(|e| PayoffError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.description.clone()),
            &txn,
        )?;

        Ok(txn)
    }

    /// Create a transaction, routing classified credit-card payments
    /// through the transfer engine.
    ///
    /// Automation requires a spending budget on the draft (there is no
    /// category to debit otherwise) and a destination card; when either is
    /// missing the transaction is recorded plainly. Storage failures from
    /// the engine are not recovered.
    pub fn add_with_automation<C: PaymentClassifier>(
        &self,
        input: CreateTransactionInput,
        classifier: &C,
    ) -> PayoffResult<AddOutcome> {
        let account = self
            .storage
            .accounts
            .get(input.account_id)?
            .ok_or_else(|| PayoffError::account_not_found(input.account_id.to_string()))?;

        let debt_names = AccountService::new(self.storage).debt_account_names()?;

        let draft = Transaction::with_details(
            input.account_id,
            input.date,
            input.amount,
            input.description.clone(),
            input.category.clone(),
            input.budget_id,
        );

        if !classifier.is_credit_card_payment(&draft, &account, &debt_names) {
            return Ok(AddOutcome::Plain(self.create(input)?));
        }

        let Some(budget_id) = input.budget_id else {
            debug!("classified payment has no spending budget; recording plainly");
            return Ok(AddOutcome::Plain(self.create(input)?));
        };

        let engine = CreditCardTransferService::new(self.storage);
        let result = engine.record_credit_card_transfer(
            CheckingLeg {
                account_id: input.account_id,
                date: input.date,
                amount: input.amount,
                description: input.description.clone(),
                category: input.category.clone(),
                budget_id: Some(budget_id),
            },
            CardLeg {
                account_id: None,
                date: input.date,
                amount: input.amount.abs(),
                description: input.description.clone(),
                category: input.category.clone(),
                budget_id: None,
            },
        );

        match result {
            Ok(transfer) => Ok(AddOutcome::Automated(Box::new(transfer))),
            Err(e) if e.is_recoverable() => {
                warn!("no credit card account; recording plain transaction instead");
                Ok(AddOutcome::Plain(self.create(input)?))
            }
            Err(e) => Err(e),
        }
    }

    /// List transactions, optionally filtered by account, newest first
    pub fn list(
        &self,
        account_id: Option<AccountId>,
        limit: usize,
    ) -> PayoffResult<Vec<Transaction>> {
        let mut transactions = match account_id {
            Some(id) => self.storage.transactions.get_by_account(id)?,
            None => self.storage.transactions.get_all()?,
        };
        transactions.truncate(limit);
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PayoffPaths;
    use crate::models::{Account, AccountType, Budget};
    use crate::services::classifier::KeywordClassifier;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayoffPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn input(account_id: AccountId, amount: i64, description: &str) -> CreateTransactionInput {
        CreateTransactionInput {
            account_id,
            date: date(),
            amount: Money::from_cents(amount),
            description: description.to_string(),
            category: None,
            budget_id: None,
        }
    }

    #[test]
    fn test_plain_create() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let account = Account::new("Checking", AccountType::Checking);
        let account_id = account.id;
        storage.accounts.upsert(account).unwrap();

        let txn = service
            .create(input(account_id, -4_200, "Grocery store"))
            .unwrap();

        assert_eq!(txn.amount.cents(), -4_200);
        assert_eq!(storage.transactions.count().unwrap(), 1);
    }

    #[test]
    fn test_create_unknown_account_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let result = service.create(input(AccountId::new(), -4_200, "Grocery store"));
        assert!(matches!(result, Err(PayoffError::NotFound { .. })));
    }

    #[test]
    fn test_automation_routes_classified_payment() {
        let (_temp_dir, storage) = create_test_storage();

        let checking = Account::new("Checking", AccountType::Checking);
        let checking_id = checking.id;
        storage.accounts.upsert(checking).unwrap();

        let visa = Account::new("Visa", AccountType::Credit);
        let visa_id = visa.id;
        storage.accounts.upsert(visa).unwrap();

        let spending = Budget::new("Everything Else");
        let spending_id = spending.id;
        storage.budgets.upsert(spending).unwrap();
        storage
            .budgets
            .upsert(Budget::payment_category("Visa Payment", visa_id))
            .unwrap();

        let service = TransactionService::new(&storage);
        let classifier = KeywordClassifier::new();

        let mut draft = input(checking_id, -25_000, "Payment to: Visa");
        draft.budget_id = Some(spending_id);

        let outcome = service.add_with_automation(draft, &classifier).unwrap();
        match outcome {
            AddOutcome::Automated(transfer) => {
                assert_eq!(transfer.card_transaction.account_id, visa_id);
            }
            AddOutcome::Plain(_) => panic!("expected automation"),
        }

        // Both legs recorded
        assert_eq!(storage.transactions.count().unwrap(), 2);
        assert_eq!(storage.transfers.count().unwrap(), 1);
    }

    #[test]
    fn test_automation_falls_back_without_card_account() {
        let (_temp_dir, storage) = create_test_storage();

        let checking = Account::new("Checking", AccountType::Checking);
        let checking_id = checking.id;
        storage.accounts.upsert(checking).unwrap();

        let spending = Budget::new("Everything Else");
        let spending_id = spending.id;
        storage.budgets.upsert(spending).unwrap();

        let service = TransactionService::new(&storage);
        let classifier = KeywordClassifier::new();

        let mut draft = input(checking_id, -25_000, "credit card payment");
        draft.budget_id = Some(spending_id);

        let outcome = service.add_with_automation(draft, &classifier).unwrap();
        assert!(matches!(outcome, AddOutcome::Plain(_)));
        assert_eq!(storage.transactions.count().unwrap(), 1);
        assert_eq!(storage.transfers.count().unwrap(), 0);
    }

    #[test]
    fn test_automation_skipped_without_budget() {
        let (_temp_dir, storage) = create_test_storage();

        let checking = Account::new("Checking", AccountType::Checking);
        let checking_id = checking.id;
        storage.accounts.upsert(checking).unwrap();
        let visa = Account::new("Visa", AccountType::Credit);
        let visa_id = visa.id;
        storage.accounts.upsert(visa).unwrap();
        storage
            .budgets
            .upsert(Budget::payment_category("Visa Payment", visa_id))
            .unwrap();

        let service = TransactionService::new(&storage);
        let classifier = KeywordClassifier::new();

        let outcome = service
            .add_with_automation(input(checking_id, -25_000, "Payment to: Visa"), &classifier)
            .unwrap();
        assert!(matches!(outcome, AddOutcome::Plain(_)));
    }

    #[test]
    fn test_non_payment_is_recorded_plainly() {
        let (_temp_dir, storage) = create_test_storage();

        let checking = Account::new("Checking", AccountType::Checking);
        let checking_id = checking.id;
        storage.accounts.upsert(checking).unwrap();

        let service = TransactionService::new(&storage);
        let classifier = KeywordClassifier::new();

        let outcome = service
            .add_with_automation(input(checking_id, -4_200, "Grocery store"), &classifier)
            .unwrap();
        assert!(matches!(outcome, AddOutcome::Plain(_)));
    }

    #[test]
    fn test_list_with_limit() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let account = Account::new("Checking", AccountType::Checking);
        let account_id = account.id;
        storage.accounts.upsert(account).unwrap();

        for i in 0..5 {
            service
                .create(input(account_id, -(1_000 + i), "Grocery store"))
                .unwrap();
        }

        assert_eq!(service.list(None, 3).unwrap().len(), 3);
        assert_eq!(service.list(Some(account_id), 10).unwrap().len(), 5);
        assert_eq!(service.list(Some(AccountId::new()), 10).unwrap().len(), 0);
    }
}
