//! Plan lifecycle service
//!
//! Create, fetch, delete, and record payments against the single active
//! payoff plan. Generating a plan supersedes the prior active one (replace
//! on generate, last write wins). Absence of an active plan is an ordinary
//! None, not an error; operations on a missing plan fail with NotFound so
//! callers can tell "no active plan" apart from a bad request.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::audit::EntityType;
use crate::error::{PayoffError, PayoffResult};
use crate::models::{
    DebtPlan, DebtPlanId, Money, PaymentRecord, Strategy, TrackingMode,
};
use crate::storage::Storage;

use super::account::AccountService;
use super::classifier::PaymentClassifier;
use super::payoff::generate_plan;
use super::progress::{MonthlyPaymentBucket, ProgressTracker};

/// Service for the payoff plan lifecycle
pub struct PlanService<'a> {
    storage: &'a Storage,
}

impl<'a> PlanService<'a> {
    /// Create a new plan service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Generate a plan from the current debt snapshot and make it the
    /// active plan, superseding any prior active plan.
    pub fn generate(
        &self,
        strategy: Strategy,
        extra_payment: Money,
        tracking: TrackingMode,
    ) -> PayoffResult<DebtPlan> {
        let debts = AccountService::new(self.storage).eligible_debts()?;
        let mut plan = generate_plan(&debts, strategy, extra_payment)?;
        plan.tracking = tracking;

        self.storage.plans.set_active(plan.clone())?;
        self.storage.plans.save()?;

        self.storage.log_create(
            EntityType::DebtPlan,
            plan.id.to_string(),
            Some(plan.title.clone()),
            &plan,
        )?;

        info!(
            plan = %plan.id,
            strategy = %plan.strategy,
            months = plan.estimated_months,
            "generated payoff plan"
        );

        Ok(plan)
    }

    /// The active plan as stored, if any
    pub fn active_plan(&self) -> PayoffResult<Option<DebtPlan>> {
        self.storage.plans.active()
    }

    /// The active plan with up-to-date progress and monthly payment buckets.
    ///
    /// For automatically-tracked plans progress is derived from the live
    /// transaction set on every call, never cached. For manually-tracked
    /// plans the stored progress and recorded payments are used.
    pub fn active_plan_with_progress<C: PaymentClassifier>(
        &self,
        classifier: &C,
    ) -> PayoffResult<Option<(DebtPlan, Vec<MonthlyPaymentBucket>)>> {
        let Some(mut plan) = self.storage.plans.active()? else {
            return Ok(None);
        };

        match plan.tracking {
            TrackingMode::Automatic => {
                let transactions = self.storage.transactions.get_all()?;
                let accounts = self.storage.accounts.get_all()?;
                let tracker = ProgressTracker::new(classifier);

                plan.progress = tracker.compute_progress(&plan, &transactions, &accounts);
                let buckets = tracker.detect_payments(&transactions, &accounts);
                Ok(Some((plan, buckets)))
            }
            TrackingMode::Manual => {
                let buckets = buckets_from_payments(&plan.payments);
                Ok(Some((plan, buckets)))
            }
        }
    }

    /// Hard-delete a plan
    pub fn delete(&self, id: DebtPlanId) -> PayoffResult<DebtPlan> {
        let plan = self
            .storage
            .plans
            .get(id)?
            .ok_or_else(|| PayoffError::plan_not_found(id.to_string()))?;

        self.storage.plans.delete(id)?;
        self.storage.plans.save()?;

        self.storage.log_delete(
            EntityType::DebtPlan,
            plan.id.to_string(),
            Some(plan.title.clone()),
            &plan,
        )?;

        Ok(plan)
    }

    /// Record a payment against a manually-tracked plan and recompute its
    /// stored progress.
    pub fn record_payment(
        &self,
        id: DebtPlanId,
        amount: Money,
        target_debt: Option<String>,
        date: NaiveDate,
    ) -> PayoffResult<DebtPlan> {
        if !amount.is_positive() {
            return Err(PayoffError::Validation(
                "Payment amount must be positive".into(),
            ));
        }

        let mut plan = self
            .storage
            .plans
            .get(id)?
            .ok_or_else(|| PayoffError::plan_not_found(id.to_string()))?;

        if plan.tracking != TrackingMode::Manual {
            return Err(PayoffError::Validation(
                "Plan tracks progress automatically; payments are detected from transactions"
                    .into(),
            ));
        }

        let before = plan.clone();
        let target = target_debt.unwrap_or_else(|| "Unspecified".to_string());
        plan.payments.push(PaymentRecord::new(amount, target, date));
        plan.recompute_progress();

        self.storage.plans.upsert(plan.clone())?;
        self.storage.plans.save()?;

        self.storage.log_update(
            EntityType::DebtPlan,
            plan.id.to_string(),
            Some(plan.title.clone()),
            &before,
            &plan,
            Some(format!(
                "progress: {:.1} -> {:.1}",
                before.progress, plan.progress
            )),
        )?;

        Ok(plan)
    }
}

/// Group recorded payments into monthly buckets, 6 most recent months,
/// most recent first (the manual-tracking counterpart of payment detection)
fn buckets_from_payments(payments: &[PaymentRecord]) -> Vec<MonthlyPaymentBucket> {
    let mut by_month: BTreeMap<(i32, u32), (String, Money, usize)> = BTreeMap::new();

    for payment in payments {
        let key = (payment.date.year(), payment.date.month());
        let entry = by_month
            .entry(key)
            .or_insert_with(|| (payment.month.clone(), Money::zero(), 0));
        entry.1 += payment.amount.abs();
        entry.2 += 1;
    }

    by_month
        .into_iter()
        .rev()
        .take(6)
        .map(|(_, (month, total, count))| MonthlyPaymentBucket {
            month,
            total,
            count,
        })
        .collect()
}
