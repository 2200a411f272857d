mod common;

use common::date;
use smartspend::{
    config::Settings,
    core::{
        services::{Achievement, BudgetStatus, ScoreTip},
        Dashboard, FinanceData,
    },
    domain::{
        ExpenseCategory, ExpenseRecord, GoalRecord, IncomeRecord, InvestmentRecord,
        InvestmentType,
    },
};

#[test]
fn empty_data_yields_neutral_dashboard() {
    let view = Dashboard::build(&FinanceData::default(), &Settings::default(), date(2024, 5, 1));
    assert_eq!(view.totals.total_savings, 0.0);
    assert_eq!(view.score.score, 42);
    assert_eq!(view.tip, ScoreTip::NeedsWork);
    assert_eq!(view.budget.status, BudgetStatus::Unset);
    assert!(view.breakdown.is_empty());
    assert!(view.achievements.is_empty());
    assert!(view.recent_activity.is_empty());
}

#[test]
fn dashboard_combines_every_figure() {
    let today = date(2024, 5, 20);
    let data = FinanceData {
        incomes: vec![
            IncomeRecord::new(Some(date(2024, 4, 1)), "Salary", 8000.0),
            IncomeRecord::new(Some(date(2024, 5, 1)), "Salary", 8000.0),
        ],
        expenses: vec![
            ExpenseRecord::new(Some(date(2024, 4, 3)), ExpenseCategory::Bills, "Rent", 1500.0),
            ExpenseRecord::new(Some(date(2024, 5, 3)), ExpenseCategory::Bills, "Rent", 1500.0),
            ExpenseRecord::new(Some(date(2024, 5, 9)), ExpenseCategory::Food, "Groceries", 400.0),
        ],
        investments: vec![InvestmentRecord::new(
            Some(date(2024, 5, 10)),
            InvestmentType::Gold,
            600.0,
            None,
        )],
        goals: vec![GoalRecord::new("Trip", 2000.0, 2000.0, None)],
    };
    let mut settings = Settings::default();
    settings.set_monthly_budget(2000.0).unwrap();

    let view = Dashboard::build(&data, &settings, today);

    assert_eq!(view.totals.total_income, 16_000.0);
    assert_eq!(view.totals.total_expenses, 3400.0);
    assert_eq!(view.totals.total_savings, 12_000.0);
    assert_eq!(view.unallocated_savings, 10_000.0);

    // budget compares all-time expenses: 3400 vs 2000 -> 0.3
    assert!((view.score.budget_score - 0.3).abs() < 1e-12);
    // 0.45 * 0.75 + 0.30 * 0.3 + 0.25 * 1.0 = 0.6775
    assert_eq!(view.score.score, 68);
    assert_eq!(view.tip, ScoreTip::Good);

    assert_eq!(view.budget.spent, 1900.0);
    assert_eq!(view.budget.status, BudgetStatus::NearLimit);
    // (8000 - 1700) - 600
    assert_eq!(view.next_month_savings, 5700.0);

    assert_eq!(view.breakdown[0].category, ExpenseCategory::Bills);
    assert_eq!(view.breakdown[0].amount, 3000.0);
    assert_eq!(
        view.achievements,
        vec![Achievement::SavedFirstTenK, Achievement::AllGoalsCompleted]
    );
    assert_eq!(view.recent_activity.len(), 6);
    assert_eq!(view.recent_activity[0].amount, 600.0);
    assert_eq!(view.trend.incomes, vec![8000.0, 8000.0, 0.0]);
}

#[test]
fn dashboard_serializes_to_json() {
    let view = Dashboard::build(&FinanceData::default(), &Settings::default(), date(2024, 1, 1));
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["currency"], "SAR");
    assert_eq!(json["score"]["score"], 42);
}
