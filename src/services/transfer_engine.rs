//! Credit-card payment transfer engine
//!
//! Records a credit-card payment as one logical unit: the checking-account
//! outflow leg, the credit-card inflow leg, and the budget-transfer ledger
//! row moving envelope money from the spending category to the card's
//! payment category. All three commit together or not at all; a
//! half-committed payment would corrupt the checking-vs-card balance
//! invariant.
//!
//! Both transaction legs live in transactions.json, so one atomic rename
//! persists them together. If the ledger write fails after that, the legs
//! are rolled back from memory and the file rewritten before the error
//! surfaces.

use chrono::NaiveDate;
use tracing::{error, warn};

use crate::audit::EntityType;
use crate::error::{PayoffError, PayoffResult};
use crate::models::{
    Account, AccountId, Budget, BudgetId, BudgetTransfer, Money, Transaction, TransferId,
};
use crate::storage::Storage;

/// Reason recorded on every automated payment transfer
pub const AUTOMATION_REASON: &str = "Credit card payment automation";

/// Draft of the outflow leg posted to a checking/depository account
#[derive(Debug, Clone)]
pub struct CheckingLeg {
    pub account_id: AccountId,
    pub date: NaiveDate,
    /// Negative amount
    pub amount: Money,
    pub description: String,
    pub category: Option<String>,
    /// The spending budget debited by the transfer
    pub budget_id: Option<BudgetId>,
}

/// Draft of the inflow leg posted to a credit-card account
#[derive(Debug, Clone)]
pub struct CardLeg {
    /// Explicit destination card. When None the engine matches one from the
    /// description, falling back to the first available card.
    pub account_id: Option<AccountId>,
    pub date: NaiveDate,
    /// Positive amount
    pub amount: Money,
    pub description: String,
    pub category: Option<String>,
    /// The payment category credited; defaults to the budget linked to the
    /// matched card
    pub budget_id: Option<BudgetId>,
}

/// Result of recording a credit-card payment
#[derive(Debug, Clone)]
pub struct CreditCardTransfer {
    /// The outflow leg posted to the checking account
    pub checking_transaction: Transaction,
    /// The inflow leg posted to the card account
    pub card_transaction: Transaction,
    /// The ledger row linking the debited and credited budgets
    pub transfer: BudgetTransfer,
}

/// Service recording credit-card payments as atomic two-leg transfers
pub struct CreditCardTransferService<'a> {
    storage: &'a Storage,
}

impl<'a> CreditCardTransferService<'a> {
    /// Create a new transfer service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a credit-card payment: both transaction legs plus the budget
    /// transfer row, committed as a single unit.
    ///
    /// # Errors
    ///
    /// - `Validation` on mismatched leg signs or amounts, a non-spending
    ///   source account, or a missing budget on either side.
    /// - `NoCreditCardAccount` when no destination card exists; the caller
    ///   falls back to recording a plain transaction.
    /// - `Storage` when persistence fails; nothing is left committed.
    pub fn record_credit_card_transfer(
        &self,
        checking: CheckingLeg,
        card: CardLeg,
    ) -> PayoffResult<CreditCardTransfer> {
        if !checking.amount.is_negative() {
            return Err(PayoffError::Validation(
                "Checking leg must be a negative amount (an outflow)".into(),
            ));
        }
        if !card.amount.is_positive() {
            return Err(PayoffError::Validation(
                "Card leg must be a positive amount (an inflow)".into(),
            ));
        }
        if checking.amount.abs() != card.amount {
            return Err(PayoffError::Validation(format!(
                "Legs must balance: {} vs {}",
                checking.amount, card.amount
            )));
        }

        let source = self
            .storage
            .accounts
            .get(checking.account_id)?
            .ok_or_else(|| PayoffError::account_not_found(checking.account_id.to_string()))?;

        if source.archived {
            return Err(PayoffError::Validation(format!(
                "Account '{}' is archived and cannot make payments",
                source.name
            )));
        }
        if !source.account_type.is_payment_source() {
            return Err(PayoffError::Validation(format!(
                "Account '{}' is not a checking/depository account",
                source.name
            )));
        }

        let from_budget = match checking.budget_id {
            Some(id) => self
                .storage
                .budgets
                .get(id)?
                .ok_or_else(|| PayoffError::budget_not_found(id.to_string()))?,
            None => {
                return Err(PayoffError::Validation(
                    "Checking leg must be assigned a spending budget".into(),
                ))
            }
        };

        let card_account = self.resolve_card_account(&card)?;
        let to_budget = self.resolve_payment_category(&card, &card_account)?;

        // Build both legs and link them
        let mut checking_txn = Transaction::with_details(
            checking.account_id,
            checking.date,
            checking.amount,
            checking.description,
            checking.category,
            Some(from_budget.id),
        );
        let mut card_txn = Transaction::with_details(
            card_account.id,
            card.date,
            card.amount,
            card.description,
            card.category,
            Some(to_budget.id),
        );
        checking_txn.transfer_transaction_id = Some(card_txn.id);
        card_txn.transfer_transaction_id = Some(checking_txn.id);

        checking_txn
            .validate()
            .map_err(|e| PayoffError::Validation(e.to_string()))?;
        card_txn
            .validate()
            .map_err(|e| PayoffError::Validation(e.to_string()))?;

        // No available-balance check on the source budget: overspending is
        // allowed and surfaced later as a reporting concern.
        let transfer = BudgetTransfer::new(
            card.amount,
            AUTOMATION_REASON,
            true,
            from_budget.id,
            to_budget.id,
            Some(checking_txn.id),
        );

        self.commit(&checking_txn, &card_txn, &transfer)?;

        self.storage.log_create(
            EntityType::Transaction,
            checking_txn.id.to_string(),
            Some(checking_txn.description.clone()),
            &checking_txn,
        )?;
        self.storage.log_create(
            EntityType::Transaction,
            card_txn.id.to_string(),
            Some(card_txn.description.clone()),
            &card_txn,
        )?;
        self.storage.log_create(
            EntityType::BudgetTransfer,
            transfer.id.to_string(),
            None,
            &transfer,
        )?;

        Ok(CreditCardTransfer {
            checking_transaction: checking_txn,
            card_transaction: card_txn,
            transfer,
        })
    }

    /// Resolve the destination card for a leg.
    ///
    /// An explicit account id wins. Otherwise: a card whose name appears in
    /// the description is targeted; with no name match the first available
    /// card is used. That fallback is a documented best-effort limitation,
    /// preserved rather than guessed around.
    fn resolve_card_account(&self, card: &CardLeg) -> PayoffResult<Account> {
        if let Some(id) = card.account_id {
            let account = self
                .storage
                .accounts
                .get(id)?
                .ok_or_else(|| PayoffError::account_not_found(id.to_string()))?;
            if !account.account_type.is_liability() {
                return Err(PayoffError::Validation(format!(
                    "Account '{}' is not a credit card",
                    account.name
                )));
            }
            return Ok(account);
        }

        let cards: Vec<Account> = self
            .storage
            .accounts
            .get_all()?
            .into_iter()
            .filter(|a| a.account_type.is_liability() && !a.archived)
            .collect();

        if cards.is_empty() {
            return Err(PayoffError::NoCreditCardAccount);
        }

        let description = card.description.to_lowercase();
        if let Some(named) = cards
            .iter()
            .find(|c| description.contains(&c.name.to_lowercase()))
        {
            return Ok(named.clone());
        }

        warn!(
            description = %card.description,
            fallback = %cards[0].name,
            "payment names no known card; falling back to first available card"
        );
        Ok(cards[0].clone())
    }

    fn resolve_payment_category(&self, card: &CardLeg, account: &Account) -> PayoffResult<Budget> {
        if let Some(id) = card.budget_id {
            return self
                .storage
                .budgets
                .get(id)?
                .ok_or_else(|| PayoffError::budget_not_found(id.to_string()));
        }

        self.storage
            .budgets
            .find_by_linked_account(account.id)?
            .ok_or_else(|| {
                PayoffError::Validation(format!(
                    "No payment category linked to '{}'; create one first",
                    account.name
                ))
            })
    }

    /// Persist both legs and the ledger row, all or nothing.
    fn commit(
        &self,
        checking_txn: &Transaction,
        card_txn: &Transaction,
        transfer: &BudgetTransfer,
    ) -> PayoffResult<()> {
        self.storage.transactions.upsert(checking_txn.clone())?;
        self.storage.transactions.upsert(card_txn.clone())?;
        self.storage.transfers.append(transfer.clone())?;

        // Both legs share transactions.json: one atomic rename covers them
        if let Err(e) = self.storage.transactions.save() {
            self.rollback(checking_txn, card_txn, transfer.id, false);
            return Err(e);
        }

        if let Err(e) = self.storage.transfers.save() {
            self.rollback(checking_txn, card_txn, transfer.id, true);
            return Err(e);
        }

        Ok(())
    }

    /// Undo an interrupted commit. When the transaction file was already
    /// written it is rewritten without the legs.
    fn rollback(
        &self,
        checking_txn: &Transaction,
        card_txn: &Transaction,
        transfer_id: TransferId,
        rewrite_transactions: bool,
    ) {
        warn!(
            transfer = %transfer_id,
            "payment transfer commit failed; rolling back both legs"
        );

        let _ = self.storage.transactions.delete(checking_txn.id);
        let _ = self.storage.transactions.delete(card_txn.id);
        let _ = self.storage.transfers.remove(transfer_id);

        if rewrite_transactions {
            if let Err(e) = self.storage.transactions.save() {
                error!(
                    transfer = %transfer_id,
                    "rollback could not rewrite the transaction file: {}", e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PayoffPaths;
    use crate::models::AccountType;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
        checking_id: AccountId,
        spending_budget: BudgetId,
        visa_id: AccountId,
        visa_payment_budget: BudgetId,
    }

    fn setup() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayoffPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let checking = Account::new("Main Checking", AccountType::Checking);
        let checking_id = checking.id;
        storage.accounts.upsert(checking).unwrap();

        let visa = Account::new("Visa", AccountType::Credit);
        let visa_id = visa.id;
        storage.accounts.upsert(visa).unwrap();

        let spending = Budget::new("Everything Else");
        let spending_budget = spending.id;
        storage.budgets.upsert(spending).unwrap();

        let payment = Budget::payment_category("Visa Payment", visa_id);
        let visa_payment_budget = payment.id;
        storage.budgets.upsert(payment).unwrap();

        storage.save_all().unwrap();

        Fixture {
            _temp_dir: temp_dir,
            storage,
            checking_id,
            spending_budget,
            visa_id,
            visa_payment_budget,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn legs(fixture: &Fixture, description: &str, cents: i64) -> (CheckingLeg, CardLeg) {
        (
            CheckingLeg {
                account_id: fixture.checking_id,
                date: date(),
                amount: Money::from_cents(-cents),
                description: description.to_string(),
                category: Some("Credit Card Payment".to_string()),
                budget_id: Some(fixture.spending_budget),
            },
            CardLeg {
                account_id: None,
                date: date(),
                amount: Money::from_cents(cents),
                description: description.to_string(),
                category: None,
                budget_id: None,
            },
        )
    }

    #[test]
    fn test_record_transfer_happy_path() {
        let fixture = setup();
        let service = CreditCardTransferService::new(&fixture.storage);

        let (checking, card) = legs(&fixture, "Payment to: Visa", 25_000);
        let result = service.record_credit_card_transfer(checking, card).unwrap();

        assert_eq!(result.checking_transaction.amount.cents(), -25_000);
        assert_eq!(result.card_transaction.amount.cents(), 25_000);
        assert_eq!(result.card_transaction.account_id, fixture.visa_id);

        // Legs are linked both ways
        assert_eq!(
            result.checking_transaction.transfer_transaction_id,
            Some(result.card_transaction.id)
        );
        assert_eq!(
            result.card_transaction.transfer_transaction_id,
            Some(result.checking_transaction.id)
        );

        // Ledger row links the budgets and the triggering transaction
        assert_eq!(result.transfer.reason, AUTOMATION_REASON);
        assert!(result.transfer.automated);
        assert_eq!(result.transfer.from_budget, fixture.spending_budget);
        assert_eq!(result.transfer.to_budget, fixture.visa_payment_budget);
        assert_eq!(
            result.transfer.transaction_id,
            Some(result.checking_transaction.id)
        );

        assert_eq!(fixture.storage.transactions.count().unwrap(), 2);
        assert_eq!(fixture.storage.transfers.count().unwrap(), 1);
    }

    #[test]
    fn test_description_matches_named_card() {
        let fixture = setup();

        // A second card that sorts first alphabetically
        let amex = Account::new("Amex", AccountType::Credit);
        let amex_id = amex.id;
        fixture.storage.accounts.upsert(amex).unwrap();
        fixture
            .storage
            .budgets
            .upsert(Budget::payment_category("Amex Payment", amex_id))
            .unwrap();

        let service = CreditCardTransferService::new(&fixture.storage);
        let (checking, card) = legs(&fixture, "Payment to: visa autopay", 10_000);
        let result = service.record_credit_card_transfer(checking, card).unwrap();

        assert_eq!(result.card_transaction.account_id, fixture.visa_id);
    }

    #[test]
    fn test_ambiguous_description_falls_back_to_first_card() {
        let fixture = setup();

        let amex = Account::new("Amex", AccountType::Credit);
        let amex_id = amex.id;
        fixture.storage.accounts.upsert(amex).unwrap();
        fixture
            .storage
            .budgets
            .upsert(Budget::payment_category("Amex Payment", amex_id))
            .unwrap();

        let service = CreditCardTransferService::new(&fixture.storage);
        let (checking, card) = legs(&fixture, "credit card payment", 10_000);
        let result = service.record_credit_card_transfer(checking, card).unwrap();

        // "Amex" sorts before "Visa"; the first available card wins
        assert_eq!(result.card_transaction.account_id, amex_id);
    }

    #[test]
    fn test_no_credit_card_account_is_recoverable() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PayoffPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let checking = Account::new("Main Checking", AccountType::Checking);
        let checking_id = checking.id;
        storage.accounts.upsert(checking).unwrap();
        let spending = Budget::new("Everything Else");
        let spending_id = spending.id;
        storage.budgets.upsert(spending).unwrap();

        let service = CreditCardTransferService::new(&storage);
        let result = service.record_credit_card_transfer(
            CheckingLeg {
                account_id: checking_id,
                date: date(),
                amount: Money::from_cents(-10_000),
                description: "credit card payment".to_string(),
                category: None,
                budget_id: Some(spending_id),
            },
            CardLeg {
                account_id: None,
                date: date(),
                amount: Money::from_cents(10_000),
                description: "credit card payment".to_string(),
                category: None,
                budget_id: None,
            },
        );

        let err = result.unwrap_err();
        assert!(matches!(err, PayoffError::NoCreditCardAccount));
        assert!(err.is_recoverable());
        assert_eq!(storage.transactions.count().unwrap(), 0);
        assert_eq!(storage.transfers.count().unwrap(), 0);
    }

    #[test]
    fn test_unbalanced_legs_rejected() {
        let fixture = setup();
        let service = CreditCardTransferService::new(&fixture.storage);

        let (checking, mut card) = legs(&fixture, "Payment to: Visa", 25_000);
        card.amount = Money::from_cents(20_000);

        let result = service.record_credit_card_transfer(checking, card);
        assert!(matches!(result, Err(PayoffError::Validation(_))));
        assert_eq!(fixture.storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_wrong_sign_legs_rejected() {
        let fixture = setup();
        let service = CreditCardTransferService::new(&fixture.storage);

        let (mut checking, card) = legs(&fixture, "Payment to: Visa", 25_000);
        checking.amount = Money::from_cents(25_000);

        let result = service.record_credit_card_transfer(checking, card);
        assert!(matches!(result, Err(PayoffError::Validation(_))));
    }

    #[test]
    fn test_missing_spending_budget_rejected() {
        let fixture = setup();
        let service = CreditCardTransferService::new(&fixture.storage);

        let (mut checking, card) = legs(&fixture, "Payment to: Visa", 25_000);
        checking.budget_id = None;

        let result = service.record_credit_card_transfer(checking, card);
        assert!(matches!(result, Err(PayoffError::Validation(_))));
    }

    #[test]
    fn test_ledger_write_failure_rolls_back_both_legs() {
        let fixture = setup();
        let service = CreditCardTransferService::new(&fixture.storage);

        // Force the ledger write to fail: a directory squats on the
        // transfers file path, so the atomic rename cannot land
        let transfers_path = fixture.storage.paths().transfers_file();
        std::fs::remove_file(&transfers_path).unwrap();
        std::fs::create_dir(&transfers_path).unwrap();

        let (checking, card) = legs(&fixture, "Payment to: Visa", 25_000);
        let result = service.record_credit_card_transfer(checking, card);
        assert!(matches!(result, Err(PayoffError::Storage(_))));

        // Nothing survives in memory
        assert_eq!(fixture.storage.transactions.count().unwrap(), 0);
        assert_eq!(fixture.storage.transfers.count().unwrap(), 0);

        // Nothing survives on disk: the transaction file was rewritten
        // without the legs
        let reloaded =
            crate::storage::TransactionRepository::new(fixture.storage.paths().transactions_file());
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 0);
    }
}
