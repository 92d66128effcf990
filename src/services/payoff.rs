//! Debt payoff plan generator
//!
//! Simulates month-by-month amortization under the snowball (smallest
//! balance first) or avalanche (highest rate first) ordering. Every debt
//! receives its minimum payment; the highest-priority unpaid debt also
//! receives the extra payment plus the minimums freed by debts already paid
//! off (the classic rollover). Interest accrues at rate/12 on the remaining
//! balance before payments apply.

use std::cmp::Ordering;

use crate::error::{PayoffError, PayoffResult};
use crate::models::{Debt, DebtPlan, DebtPlanId, Money, PlanStatus, Strategy, TrackingMode};

/// Safety valve: a schedule that has not converged after 100 years is
/// rejected instead of simulated further.
pub const MAX_SIMULATION_MONTHS: u32 = 1200;

/// Generate a payoff plan for `debts` under `strategy` with `extra_payment`
/// directed at the highest-priority debt each month.
///
/// # Errors
///
/// - `Validation` for an empty debt list, a negative extra payment, an
///   invalid debt snapshot, or the non-generatable `ai_custom` strategy.
/// - `UnpayableSchedule` when a month passes without the total owed
///   shrinking, or the simulation exceeds [`MAX_SIMULATION_MONTHS`].
pub fn generate_plan(
    debts: &[Debt],
    strategy: Strategy,
    extra_payment: Money,
) -> PayoffResult<DebtPlan> {
    if debts.is_empty() {
        return Err(PayoffError::Validation(
            "No debts eligible for payoff planning".into(),
        ));
    }

    if extra_payment.is_negative() {
        return Err(PayoffError::Validation(
            "Extra payment cannot be negative".into(),
        ));
    }

    if strategy == Strategy::AiCustom {
        return Err(PayoffError::Validation(
            "ai_custom plans are authored externally and cannot be generated".into(),
        ));
    }

    for debt in debts {
        debt.validate()
            .map_err(|e| PayoffError::Validation(e.to_string()))?;
    }

    let ordered = order_debts(debts, strategy);
    let total_debt: Money = ordered.iter().map(|d| d.balance).sum();
    let minimum_total: Money = ordered.iter().map(|d| d.minimum_payment).sum();
    let monthly_payment = minimum_total + extra_payment;

    let (estimated_months, steps) = simulate(&ordered, extra_payment)?;

    Ok(DebtPlan {
        id: DebtPlanId::new(),
        title: format!("{} Payoff Plan", strategy),
        description: format!(
            "Pay off {} debts in {} months at {} per month",
            ordered.len(),
            estimated_months,
            monthly_payment
        ),
        strategy,
        steps,
        total_debt,
        monthly_payment,
        estimated_months,
        progress: 0.0,
        status: PlanStatus::Active,
        tracking: TrackingMode::default(),
        payments: Vec::new(),
        created_at: chrono::Utc::now(),
    })
}

/// Sort debts into payoff priority order for a strategy.
///
/// Snowball: ascending balance. Avalanche: descending rate, with a missing
/// rate treated as zero (and therefore sorted last). Both sorts are stable,
/// so ties keep their input order.
fn order_debts(debts: &[Debt], strategy: Strategy) -> Vec<Debt> {
    let mut ordered = debts.to_vec();
    match strategy {
        Strategy::Snowball => ordered.sort_by(|a, b| a.balance.cmp(&b.balance)),
        Strategy::Avalanche => ordered.sort_by(|a, b| {
            b.rate_or_zero()
                .partial_cmp(&a.rate_or_zero())
                .unwrap_or(Ordering::Equal)
        }),
        Strategy::AiCustom => {}
    }
    ordered
}

struct SimDebt {
    name: String,
    balance: Money,
    minimum: Money,
    rate: f64,
}

/// Run the amortization simulation over debts already in priority order.
/// Returns the month count and the "Pay off {name}" steps in payoff order.
fn simulate(ordered: &[Debt], extra_payment: Money) -> PayoffResult<(u32, Vec<String>)> {
    let mut sim: Vec<SimDebt> = ordered
        .iter()
        .map(|d| SimDebt {
            name: d.account_name.clone(),
            balance: d.balance,
            minimum: d.minimum_payment,
            rate: d.rate_or_zero(),
        })
        .collect();

    let mut steps = Vec::with_capacity(sim.len());
    let mut months: u32 = 0;

    while sim.iter().any(|d| d.balance.is_positive()) {
        months += 1;
        if months > MAX_SIMULATION_MONTHS {
            return Err(PayoffError::UnpayableSchedule(format!(
                "No payoff within {} months at the current payments",
                MAX_SIMULATION_MONTHS
            )));
        }

        let total_before: Money = sim.iter().map(|d| d.balance).sum();

        // Minimums freed by debts paid off in earlier months join the pool
        let freed: Money = sim
            .iter()
            .filter(|d| !d.balance.is_positive())
            .map(|d| d.minimum)
            .sum();
        let extra_pool = extra_payment + freed;

        // Interest accrues on the remaining balance before payments apply
        for debt in sim.iter_mut().filter(|d| d.balance.is_positive()) {
            debt.balance += debt.balance.monthly_interest(debt.rate);
        }

        // Every unpaid debt pays its minimum; the first unpaid debt in
        // priority order also receives the extra pool
        let mut extra_taken = false;
        for debt in sim.iter_mut() {
            if !debt.balance.is_positive() {
                continue;
            }

            let mut payment = debt.minimum;
            if !extra_taken {
                payment += extra_pool;
                extra_taken = true;
            }

            let payment = payment.min(debt.balance);
            debt.balance -= payment;

            if !debt.balance.is_positive() {
                steps.push(format!("Pay off {}", debt.name));
            }
        }

        let total_after: Money = sim.iter().map(|d| d.balance).sum();
        if total_after >= total_before {
            return Err(PayoffError::UnpayableSchedule(format!(
                "Monthly interest outpaces payments after month {}; increase the extra payment",
                months
            )));
        }
    }

    Ok((months, steps))
}
