//! Text rendering of dashboard figures.

use crate::core::services::{BudgetStatus, GoalAllocator, Totals};
use crate::core::Dashboard;
use crate::currency::{format_amount, Currency};
use crate::domain::{Displayable, ExpenseRecord, GoalRecord};

use super::output;

fn percent(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn dashboard(view: &Dashboard) {
    let money = |amount: f64| format_amount(amount, view.currency);

    output::section("SmartSpend Dashboard");
    totals(&view.totals, view.currency);
    output::field("Unallocated savings", money(view.unallocated_savings));
    output::field("Next month (estimate)", money(view.next_month_savings));

    output::section("SmartScore");
    let score = &view.score;
    output::field("Score", format!("{}/100", score.score));
    output::field(
        "Components",
        format!(
            "savings {} | budget {} | goals {}",
            percent(score.savings_rate),
            percent(score.budget_score),
            percent(score.goal_score)
        ),
    );
    output::info(view.tip);

    output::section("Monthly Budget");
    let budget = &view.budget;
    match budget.status {
        BudgetStatus::Unset => output::info("No monthly budget set."),
        status => {
            output::field(
                "Spent this month",
                format!(
                    "{} of {} ({})",
                    money(budget.spent),
                    money(budget.budget),
                    percent(budget.used)
                ),
            );
            match status {
                BudgetStatus::OverBudget => output::warning("Over budget this month."),
                BudgetStatus::NearLimit => output::warning("Close to this month's budget."),
                _ => output::success("Spending is on track."),
            }
        }
    }

    if !view.breakdown.is_empty() {
        output::section("Spending by Category");
        for entry in &view.breakdown {
            output::field(entry.category.label(), money(entry.amount));
        }
    }

    if !view.achievements.is_empty() {
        output::section("Achievements");
        for achievement in &view.achievements {
            if achievement.is_warning() {
                output::warning(achievement);
            } else {
                output::success(achievement);
            }
        }
    }

    if !view.recent_activity.is_empty() {
        output::section("Recent Activity");
        for entry in &view.recent_activity {
            let date = entry
                .date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "----------".into());
            println!(
                "  {date}  {:<10} {:<24} {}",
                entry.kind.to_string(),
                entry.label,
                money(entry.amount)
            );
        }
    }
}

pub fn totals(totals: &Totals, currency: Currency) {
    output::field("Total income", format_amount(totals.total_income, currency));
    output::field("Total expenses", format_amount(totals.total_expenses, currency));
    output::field(
        "Investment value",
        format_amount(totals.total_investment_value, currency),
    );
    output::field("Savings", format_amount(totals.total_savings, currency));
}

pub fn expenses(rows: &[ExpenseRecord], currency: Currency) {
    if rows.is_empty() {
        output::info("No expenses recorded.");
        return;
    }
    for row in rows {
        let date = row.date.map(|d| d.to_string()).unwrap_or_default();
        println!(
            "  {}  {:<10}  {:<14} {:<24} {}",
            row.id,
            date,
            row.category.label(),
            row.description,
            format_amount(row.amount, currency)
        );
    }
}

pub fn goals(goals: &[GoalRecord], allocator: &GoalAllocator, currency: Currency) {
    if goals.is_empty() {
        output::info("No goals yet. Use `goal-set <name> <target>` to add one.");
    }
    for goal in goals {
        let target_date = goal
            .target_date
            .map(|d| format!(" by {d}"))
            .unwrap_or_default();
        let status = if goal.is_complete() {
            "reached".to_string()
        } else {
            format!("{} to go", format_amount(goal.outstanding(), currency))
        };
        println!(
            "  {:<28} {} / {}{} ({status})",
            goal.display_label(),
            format_amount(goal.saved_so_far, currency),
            format_amount(goal.target_amount, currency),
            target_date
        );
    }
    output::field(
        "Available to allocate",
        format_amount(allocator.remaining(goals), currency),
    );
}
