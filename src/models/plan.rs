//! Debt payoff plan model
//!
//! A DebtPlan is the persisted outcome of one plan-generation call: the
//! strategy, the milestone steps in payoff order, the frozen totals, and
//! (for manually-tracked plans) the recorded payments. At most one plan is
//! active at a time; generating a new plan supersedes the prior active one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{DebtPlanId, PaymentId};
use super::money::Money;

/// Debt payoff ordering strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Smallest balance first
    #[default]
    Snowball,
    /// Highest interest rate first
    Avalanche,
    /// Externally-authored plan; preserved on load, never generated here
    AiCustom,
}

impl Strategy {
    /// Parse a strategy from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "snowball" => Some(Self::Snowball),
            "avalanche" => Some(Self::Avalanche),
            "ai_custom" | "ai-custom" | "custom" => Some(Self::AiCustom),
            _ => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snowball => write!(f, "Snowball"),
            Self::Avalanche => write!(f, "Avalanche"),
            Self::AiCustom => write!(f, "Custom"),
        }
    }
}

/// Lifecycle status of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Completed => write!(f, "Completed"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// How progress against the plan is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// Progress derived on every read by scanning transactions
    #[default]
    Automatic,
    /// Progress driven by explicitly recorded payments
    Manual,
}

/// One recorded payment applied toward a plan (manual tracking only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Unique identifier
    pub id: PaymentId,

    /// Payment amount (positive)
    pub amount: Money,

    /// Name of the debt the payment targets
    pub target_debt: String,

    /// Payment date
    pub date: NaiveDate,

    /// Display label for the payment's month, e.g. "Jan 2024"
    pub month: String,
}

impl PaymentRecord {
    /// Create a payment record, deriving the month label from the date
    pub fn new(amount: Money, target_debt: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: PaymentId::new(),
            amount,
            target_debt: target_debt.into(),
            date,
            month: date.format("%b %Y").to_string(),
        }
    }
}

/// A persisted debt payoff plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtPlan {
    /// Unique identifier
    pub id: DebtPlanId,

    /// Plan title, e.g. "Snowball Payoff Plan"
    pub title: String,

    /// Human-readable summary of the plan
    #[serde(default)]
    pub description: String,

    /// The ordering strategy this plan was generated under
    pub strategy: Strategy,

    /// One milestone per debt, in payoff order ("Pay off Visa")
    pub steps: Vec<String>,

    /// Sum of debt balances when the plan was generated (frozen)
    pub total_debt: Money,

    /// Sum of minimum payments plus the extra payment
    pub monthly_payment: Money,

    /// Simulated months until every balance reaches zero
    pub estimated_months: u32,

    /// Percent complete, 0-100. Stored for manually-tracked plans;
    /// recomputed from transactions on read for automatic plans.
    #[serde(default)]
    pub progress: f64,

    /// Lifecycle status
    #[serde(default)]
    pub status: PlanStatus,

    /// How progress is tracked
    #[serde(default)]
    pub tracking: TrackingMode,

    /// Recorded payments (manual tracking only)
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,

    /// When the plan was created
    pub created_at: DateTime<Utc>,
}

impl DebtPlan {
    /// Whether this is the active plan
    pub fn is_active(&self) -> bool {
        self.status == PlanStatus::Active
    }

    /// Sum of recorded payments
    pub fn recorded_total(&self) -> Money {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Recompute the stored progress field from recorded payments,
    /// clamped to [0, 100]
    pub fn recompute_progress(&mut self) {
        self.progress = progress_percent(self.recorded_total(), self.total_debt);
    }
}

impl fmt::Display for DebtPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} over {} months)",
            self.title, self.strategy, self.total_debt, self.estimated_months
        )
    }
}

/// Percent of `total_debt` covered by `paid`, clamped to [0, 100].
///
/// An approximation shared by both tracking modes: payments are measured
/// against the frozen original debt, so new charges that grow a balance are
/// not netted out.
pub fn progress_percent(paid: Money, total_debt: Money) -> f64 {
    if !total_debt.is_positive() {
        return 0.0;
    }
    let pct = paid.cents() as f64 / total_debt.cents() as f64 * 100.0;
    pct.clamp(0.0, 100.0)
}
