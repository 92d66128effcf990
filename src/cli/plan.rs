//! Payoff plan CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_plan;
use crate::error::{PayoffError, PayoffResult};
use crate::models::{Strategy, TrackingMode};
use crate::services::{KeywordClassifier, PlanService};
use crate::storage::Storage;

use super::{parse_date_arg, parse_money_arg};

/// Payoff plan subcommands
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Generate a payoff plan from current debts, replacing the active plan
    Generate {
        /// Payoff strategy (snowball or avalanche; defaults to settings)
        #[arg(short, long)]
        strategy: Option<String>,
        /// Extra monthly payment beyond the minimums (e.g., "100.00")
        #[arg(short, long, default_value = "0")]
        extra: String,
        /// Track progress from manually recorded payments instead of
        /// detecting them from transactions
        #[arg(long)]
        manual: bool,
    },
    /// Show the active plan with progress and recent payments
    Show,
    /// Delete the active plan
    Delete {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Record a payment against the active plan (manual tracking only)
    Record {
        /// Payment amount (e.g., "250.00")
        amount: String,
        /// The debt the payment targets
        #[arg(short, long)]
        debt: Option<String>,
        /// Payment date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

/// Handle a plan command
pub fn handle_plan_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PlanCommands,
) -> PayoffResult<()> {
    let service = PlanService::new(storage);

    match cmd {
        PlanCommands::Generate {
            strategy,
            extra,
            manual,
        } => {
            let strategy = match strategy {
                Some(s) => Strategy::parse(&s).ok_or_else(|| {
                    PayoffError::Validation(format!(
                        "Invalid strategy: '{}'. Valid strategies: snowball, avalanche",
                        s
                    ))
                })?,
                None => settings.default_strategy,
            };

            let extra_payment = parse_money_arg(&extra)?;
            let tracking = if manual {
                TrackingMode::Manual
            } else {
                TrackingMode::Automatic
            };

            let plan = service.generate(strategy, extra_payment, tracking)?;

            println!("Generated {}", plan.title);
            println!("  {}", plan.description);
            println!("  Total debt: {}", plan.total_debt);
            println!("  Monthly payment: {}", plan.monthly_payment);
            for (i, step) in plan.steps.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
        }

        PlanCommands::Show => {
            let classifier =
                KeywordClassifier::with_extra_keywords(settings.extra_payment_keywords.clone());
            match service.active_plan_with_progress(&classifier)? {
                Some((plan, buckets)) => {
                    print!("{}", format_plan(&plan, &buckets));
                }
                None => {
                    println!("No active plan. Run 'payoff plan generate' to create one.");
                }
            }
        }

        PlanCommands::Delete { yes } => {
            let plan = service
                .active_plan()?
                .ok_or_else(|| PayoffError::plan_not_found("active"))?;

            if !yes {
                println!(
                    "This will permanently delete '{}'. Re-run with --yes to confirm.",
                    plan.title
                );
                return Ok(());
            }

            let deleted = service.delete(plan.id)?;
            println!("Deleted {}", deleted.title);
        }

        PlanCommands::Record { amount, debt, date } => {
            let plan = service
                .active_plan()?
                .ok_or_else(|| PayoffError::plan_not_found("active"))?;

            let amount = parse_money_arg(&amount)?;
            let date = parse_date_arg(date.as_deref())?;

            let updated = service.record_payment(plan.id, amount, debt, date)?;
            println!(
                "Recorded {} toward {} ({:.1}% complete)",
                amount, updated.title, updated.progress
            );
        }
    }

    Ok(())
}
