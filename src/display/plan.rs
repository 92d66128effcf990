//! Payoff plan detail view

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::DebtPlan;
use crate::services::MonthlyPaymentBucket;

#[derive(Tabled)]
struct BucketRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Paid")]
    total: String,
    #[tabled(rename = "Payments")]
    count: usize,
}

/// Format the active plan with its steps and recent monthly payments
pub fn format_plan(plan: &DebtPlan, buckets: &[MonthlyPaymentBucket]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} ({})\n", plan.title, plan.status));
    if !plan.description.is_empty() {
        output.push_str(&format!("  {}\n", plan.description));
    }
    output.push('\n');
    output.push_str(&format!("  Strategy:          {}\n", plan.strategy));
    output.push_str(&format!("  Total debt:        {}\n", plan.total_debt));
    output.push_str(&format!("  Monthly payment:   {}\n", plan.monthly_payment));
    output.push_str(&format!("  Estimated months:  {}\n", plan.estimated_months));
    output.push_str(&format!("  Progress:          {:.1}%\n", plan.progress));
    output.push_str(&format!(
        "  Created:           {}\n",
        plan.created_at.format("%Y-%m-%d")
    ));

    output.push_str("\nSteps:\n");
    for (i, step) in plan.steps.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, step));
    }

    if !buckets.is_empty() {
        output.push_str("\nRecent payments:\n");
        let rows = buckets.iter().map(|b| BucketRow {
            month: b.month.clone(),
            total: b.total.to_string(),
            count: b.count,
        });
        output.push_str(&Table::new(rows).with(Style::sharp()).to_string());
        output.push('\n');
    }

    output
}
