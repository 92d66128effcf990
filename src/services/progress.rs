//! Payoff progress tracker
//!
//! Derives plan progress from live transaction data on every read; nothing
//! here is cached or persisted. A transaction counts as a debt payment when
//! it is either leg of a credit-card payment: the classified outflow from a
//! spending account, or the matching inflow to a liability account. Both
//! legs of one payment therefore both count, and new charges that grow a
//! balance are not netted out; progress is an approximation measured
//! against the plan's frozen original debt.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;

use crate::models::plan::progress_percent;
use crate::models::{Account, AccountId, DebtPlan, Money, Transaction};

use super::classifier::{is_credit_card_inflow, PaymentClassifier};

/// Detected payments for one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyPaymentBucket {
    /// Display label, e.g. "Jan 2024"
    pub month: String,
    /// Sum of absolute payment amounts in the month
    pub total: Money,
    /// Number of matching transactions in the month
    pub count: usize,
}

/// How many recent months of detected payments are reported
const BUCKET_MONTHS: usize = 6;

/// Derives payoff progress from transactions and accounts
pub struct ProgressTracker<'c, C: PaymentClassifier> {
    classifier: &'c C,
}

impl<'c, C: PaymentClassifier> ProgressTracker<'c, C> {
    /// Create a tracker over a classifier
    pub fn new(classifier: &'c C) -> Self {
        Self { classifier }
    }

    /// Group detected payments by calendar month, keeping the
    /// [`BUCKET_MONTHS`] most recent months, most recent first.
    pub fn detect_payments(
        &self,
        transactions: &[Transaction],
        accounts: &[Account],
    ) -> Vec<MonthlyPaymentBucket> {
        let by_id = account_index(accounts);
        let debt_names = debt_account_names(accounts);

        let mut by_month: BTreeMap<(i32, u32), (String, Money, usize)> = BTreeMap::new();

        for txn in transactions {
            if !self.is_debt_payment(txn, &by_id, &debt_names) {
                continue;
            }

            let key = (txn.date.year(), txn.date.month());
            let entry = by_month
                .entry(key)
                .or_insert_with(|| (txn.date.format("%b %Y").to_string(), Money::zero(), 0));
            entry.1 += txn.amount.abs();
            entry.2 += 1;
        }

        by_month
            .into_iter()
            .rev()
            .take(BUCKET_MONTHS)
            .map(|(_, (month, total, count))| MonthlyPaymentBucket {
                month,
                total,
                count,
            })
            .collect()
    }

    /// Sum of absolute amounts over every detected payment, all months
    pub fn detected_total(&self, transactions: &[Transaction], accounts: &[Account]) -> Money {
        let by_id = account_index(accounts);
        let debt_names = debt_account_names(accounts);

        transactions
            .iter()
            .filter(|t| self.is_debt_payment(t, &by_id, &debt_names))
            .map(|t| t.amount.abs())
            .sum()
    }

    /// Percent of the plan's original debt covered by detected payments,
    /// clamped to [0, 100]
    pub fn compute_progress(
        &self,
        plan: &DebtPlan,
        transactions: &[Transaction],
        accounts: &[Account],
    ) -> f64 {
        progress_percent(self.detected_total(transactions, accounts), plan.total_debt)
    }

    fn is_debt_payment(
        &self,
        txn: &Transaction,
        accounts: &HashMap<AccountId, &Account>,
        debt_names: &[String],
    ) -> bool {
        let Some(account) = accounts.get(&txn.account_id) else {
            return false;
        };

        self.classifier
            .is_credit_card_payment(txn, account, debt_names)
            || is_credit_card_inflow(txn, account)
    }
}

fn account_index(accounts: &[Account]) -> HashMap<AccountId, &Account> {
    accounts.iter().map(|a| (a.id, a)).collect()
}

fn debt_account_names(accounts: &[Account]) -> Vec<String> {
    accounts
        .iter()
        .filter(|a| a.account_type.is_liability())
        .map(|a| a.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, DebtPlanId, PlanStatus, Strategy, TrackingMode};
    use crate::services::classifier::KeywordClassifier;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(account: &Account, dt: NaiveDate, amount: i64, description: &str) -> Transaction {
        Transaction::with_details(
            account.id,
            dt,
            Money::from_cents(amount),
            description,
            None,
            None,
        )
    }

    fn plan(total_debt_cents: i64) -> DebtPlan {
        DebtPlan {
            id: DebtPlanId::new(),
            title: "Snowball Payoff Plan".to_string(),
            description: String::new(),
            strategy: Strategy::Snowball,
            steps: vec!["Pay off Visa".to_string()],
            total_debt: Money::from_cents(total_debt_cents),
            monthly_payment: Money::from_cents(25_000),
            estimated_months: 12,
            progress: 0.0,
            status: PlanStatus::Active,
            tracking: TrackingMode::Automatic,
            payments: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    fn fixture() -> (Account, Account, KeywordClassifier) {
        let checking = Account::new("Main Checking", AccountType::Checking);
        let card = Account::new("Visa", AccountType::Credit);
        (checking, card, KeywordClassifier::new())
    }

    #[test]
    fn test_both_legs_are_detected() {
        let (checking, card, classifier) = fixture();
        let tracker = ProgressTracker::new(&classifier);

        let transactions = vec![
            txn(&checking, date(2024, 1, 15), -25_000, "Payment to: Visa"),
            txn(&card, date(2024, 1, 15), 25_000, "Payment received"),
            txn(&checking, date(2024, 1, 16), -4_200, "Grocery store"),
        ];
        let accounts = vec![checking, card];

        let buckets = tracker.detect_payments(&transactions, &accounts);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].month, "Jan 2024");
        // Both legs of the same payment count toward the total
        assert_eq!(buckets[0].total.cents(), 50_000);
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_debt_name_match_without_keywords() {
        let (checking, card, classifier) = fixture();
        let tracker = ProgressTracker::new(&classifier);

        let transactions = vec![txn(&checking, date(2024, 2, 1), -10_000, "ACH visa 4242")];
        let accounts = vec![checking, card];

        let buckets = tracker.detect_payments(&transactions, &accounts);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total.cents(), 10_000);
    }

    #[test]
    fn test_buckets_keep_six_most_recent_months_newest_first() {
        let (checking, card, classifier) = fixture();
        let tracker = ProgressTracker::new(&classifier);

        let mut transactions = Vec::new();
        for month in 1..=8 {
            transactions.push(txn(
                &checking,
                date(2024, month, 5),
                -(month as i64) * 1_000,
                "Payment to: Visa",
            ));
        }
        let accounts = vec![checking, card];

        let buckets = tracker.detect_payments(&transactions, &accounts);
        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0].month, "Aug 2024");
        assert_eq!(buckets[5].month, "Mar 2024");
        assert_eq!(buckets[0].total.cents(), 8_000);
    }

    #[test]
    fn test_compute_progress() {
        let (checking, card, classifier) = fixture();
        let tracker = ProgressTracker::new(&classifier);
        let plan = plan(100_000);

        let transactions = vec![txn(&checking, date(2024, 3, 1), -25_000, "Payment to: Visa")];
        let accounts = vec![checking, card];

        let progress = tracker.compute_progress(&plan, &transactions, &accounts);
        assert_eq!(progress, 25.0);
    }

    #[test]
    fn test_progress_clamped_to_100() {
        let (checking, card, classifier) = fixture();
        let tracker = ProgressTracker::new(&classifier);
        let plan = plan(10_000);

        let transactions = vec![
            txn(&checking, date(2024, 3, 1), -25_000, "Payment to: Visa"),
            txn(&card, date(2024, 3, 1), 25_000, "Payment received"),
        ];
        let accounts = vec![checking, card];

        let progress = tracker.compute_progress(&plan, &transactions, &accounts);
        assert_eq!(progress, 100.0);
    }

    #[test]
    fn test_no_matches_is_zero_progress() {
        let (checking, card, classifier) = fixture();
        let tracker = ProgressTracker::new(&classifier);
        let plan = plan(100_000);

        let transactions = vec![txn(&checking, date(2024, 3, 1), -4_200, "Grocery store")];
        let accounts = vec![checking, card];

        assert!(tracker
            .detect_payments(&transactions, &accounts)
            .is_empty());
        assert_eq!(
            tracker.compute_progress(&plan, &transactions, &accounts),
            0.0
        );
    }

    #[test]
    fn test_unknown_account_is_ignored() {
        let (checking, card, classifier) = fixture();
        let tracker = ProgressTracker::new(&classifier);

        let orphan = Account::new("Old Checking", AccountType::Checking);
        let transactions = vec![txn(&orphan, date(2024, 3, 1), -25_000, "Payment to: Visa")];
        let accounts = vec![checking, card];

        assert!(tracker
            .detect_payments(&transactions, &accounts)
            .is_empty());
    }
}
