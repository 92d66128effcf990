//! Credit-card payment classifier
//!
//! Decides whether a transaction is a credit-card payment using keyword
//! heuristics over the description and category. The predicate is pure and
//! side-effect free, and lives behind a trait so the heuristic can be
//! swapped (e.g. for a merchant-ID lookup) without touching the transfer
//! engine or the progress tracker, which depend only on the boolean
//! contract.

use crate::models::{Account, Transaction};

/// Category keywords that mark a payment (substring, case-insensitive)
const CATEGORY_KEYWORDS: [&str; 2] = ["credit card", "payment"];

/// Description keywords that mark a payment (substring, case-insensitive)
const DESCRIPTION_KEYWORDS: [&str; 1] = ["credit card"];

/// Description prefixes that mark a payment (case-insensitive)
const DESCRIPTION_PREFIXES: [&str; 2] = ["payment to:", "payment:"];

/// Pluggable predicate deciding whether a transaction is a credit-card
/// payment drawn from a spending account
pub trait PaymentClassifier {
    /// True when `txn`, posted to `source`, is the outflow leg of a
    /// credit-card payment. `known_debt_names` are the names of the user's
    /// liability accounts, matched case-insensitively against the
    /// description.
    fn is_credit_card_payment(
        &self,
        txn: &Transaction,
        source: &Account,
        known_debt_names: &[String],
    ) -> bool;
}

/// The default keyword-heuristic classifier
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier {
    /// Additional user-configured description keywords
    extra_keywords: Vec<String>,
}

impl KeywordClassifier {
    /// Create a classifier with the built-in keyword set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with additional description keywords
    /// (from `Settings::extra_payment_keywords`)
    pub fn with_extra_keywords(extra_keywords: Vec<String>) -> Self {
        Self {
            extra_keywords: extra_keywords
                .into_iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }
}

impl PaymentClassifier for KeywordClassifier {
    fn is_credit_card_payment(
        &self,
        txn: &Transaction,
        source: &Account,
        known_debt_names: &[String],
    ) -> bool {
        // Only outflows qualify; a zero amount never does
        if !txn.amount.is_negative() {
            return false;
        }

        // A credit account is the destination of a payment, never the source
        if source.account_type.is_liability() {
            return false;
        }

        if !source.account_type.is_payment_source() {
            return false;
        }

        if let Some(category) = &txn.category {
            let category = category.to_lowercase();
            if CATEGORY_KEYWORDS.iter().any(|k| category.contains(k)) {
                return true;
            }
        }

        let description = txn.description.to_lowercase();

        if DESCRIPTION_KEYWORDS.iter().any(|k| description.contains(k)) {
            return true;
        }

        if DESCRIPTION_PREFIXES
            .iter()
            .any(|p| description.starts_with(p))
        {
            return true;
        }

        if known_debt_names
            .iter()
            .filter(|n| !n.trim().is_empty())
            .any(|n| description.contains(&n.to_lowercase()))
        {
            return true;
        }

        self.extra_keywords.iter().any(|k| description.contains(k))
    }
}

/// True when `txn`, posted to `account`, is the inflow leg of a credit-card
/// payment: a positive amount landing on a liability account.
///
/// The progress tracker combines this with the classifier so a payment is
/// detected from either of its legs.
pub fn is_credit_card_inflow(txn: &Transaction, account: &Account) -> bool {
    account.account_type.is_liability() && txn.amount.is_positive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, Money};
    use chrono::NaiveDate;

    fn txn(account: &Account, amount: i64, description: &str, category: Option<&str>) -> Transaction {
        Transaction::with_details(
            account.id,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            Money::from_cents(amount),
            description,
            category.map(|c| c.to_string()),
            None,
        )
    }

    fn checking() -> Account {
        Account::new("Main Checking", AccountType::Checking)
    }

    fn no_debts() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_category_keyword_matches() {
        let classifier = KeywordClassifier::new();
        let source = checking();

        let t = txn(&source, -25_000, "Online transfer", Some("Credit Card Payment"));
        assert!(classifier.is_credit_card_payment(&t, &source, &no_debts()));

        let t = txn(&source, -25_000, "Online transfer", Some("payment"));
        assert!(classifier.is_credit_card_payment(&t, &source, &no_debts()));

        let t = txn(&source, -25_000, "Online transfer", Some("Groceries"));
        assert!(!classifier.is_credit_card_payment(&t, &source, &no_debts()));
    }

    #[test]
    fn test_description_keyword_and_prefixes() {
        let classifier = KeywordClassifier::new();
        let source = checking();

        let t = txn(&source, -25_000, "CREDIT CARD AUTOPAY", None);
        assert!(classifier.is_credit_card_payment(&t, &source, &no_debts()));

        let t = txn(&source, -25_000, "Payment to: Chase", None);
        assert!(classifier.is_credit_card_payment(&t, &source, &no_debts()));

        let t = txn(&source, -25_000, "Payment: Chase", None);
        assert!(classifier.is_credit_card_payment(&t, &source, &no_debts()));

        // "payment" alone in the middle of a description is not enough
        let t = txn(&source, -25_000, "car payment plan brochure", None);
        assert!(!classifier.is_credit_card_payment(&t, &source, &no_debts()));
    }

    #[test]
    fn test_known_debt_name_matches() {
        let classifier = KeywordClassifier::new();
        let source = checking();
        let debts = vec!["Chase Sapphire".to_string()];

        let t = txn(&source, -25_000, "ACH to chase sapphire 1234", None);
        assert!(classifier.is_credit_card_payment(&t, &source, &debts));

        let t = txn(&source, -25_000, "ACH to amex", None);
        assert!(!classifier.is_credit_card_payment(&t, &source, &debts));
    }

    #[test]
    fn test_zero_and_inflow_never_qualify() {
        let classifier = KeywordClassifier::new();
        let source = checking();

        let t = txn(&source, 0, "credit card payment", None);
        assert!(!classifier.is_credit_card_payment(&t, &source, &no_debts()));

        let t = txn(&source, 25_000, "credit card payment", None);
        assert!(!classifier.is_credit_card_payment(&t, &source, &no_debts()));
    }

    #[test]
    fn test_credit_source_never_qualifies() {
        let classifier = KeywordClassifier::new();
        let card = Account::new("Visa", AccountType::Credit);

        let t = txn(&card, -25_000, "credit card payment", None);
        assert!(!classifier.is_credit_card_payment(&t, &card, &no_debts()));
    }

    #[test]
    fn test_savings_source_never_qualifies() {
        let classifier = KeywordClassifier::new();
        let savings = Account::new("Rainy Day", AccountType::Savings);

        let t = txn(&savings, -25_000, "credit card payment", None);
        assert!(!classifier.is_credit_card_payment(&t, &savings, &no_debts()));
    }

    #[test]
    fn test_depository_source_qualifies() {
        let classifier = KeywordClassifier::new();
        let depository = Account::new("Cash Mgmt", AccountType::Depository);

        let t = txn(&depository, -25_000, "credit card payment", None);
        assert!(classifier.is_credit_card_payment(&t, &depository, &no_debts()));
    }

    #[test]
    fn test_extra_keywords() {
        let classifier = KeywordClassifier::with_extra_keywords(vec!["AutoPay".to_string()]);
        let source = checking();

        let t = txn(&source, -25_000, "monthly autopay draft", None);
        assert!(classifier.is_credit_card_payment(&t, &source, &no_debts()));

        let plain = KeywordClassifier::new();
        assert!(!plain.is_credit_card_payment(&t, &source, &no_debts()));
    }

    #[test]
    fn test_classifier_is_deterministic() {
        let classifier = KeywordClassifier::new();
        let source = checking();
        let t = txn(&source, -25_000, "Payment to: Visa", None);

        let first = classifier.is_credit_card_payment(&t, &source, &no_debts());
        let second = classifier.is_credit_card_payment(&t, &source, &no_debts());
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_card_inflow_check() {
        let card = Account::new("Visa", AccountType::Credit);
        let inflow = txn(&card, 25_000, "Payment received", None);
        assert!(is_credit_card_inflow(&inflow, &card));

        let outflow = txn(&card, -4_200, "Grocery store", None);
        assert!(!is_credit_card_inflow(&outflow, &card));

        let source = checking();
        let deposit = txn(&source, 25_000, "Paycheck", None);
        assert!(!is_credit_card_inflow(&deposit, &source));
    }
}
