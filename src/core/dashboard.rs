//! One explicit recompute of every dashboard figure from loaded records.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Settings;
use crate::currency::Currency;

use super::services::{
    Achievement, ActivityEntry, BudgetProgress, BudgetService, CategoryTotal, GoalAllocator,
    InsightService, ScoreBreakdown, ScoreService, ScoreTip, Totals, TotalsService, TrendSeries,
};
use super::FinanceData;

pub const RECENT_ACTIVITY_LIMIT: usize = 10;
pub const TREND_WINDOW: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub currency: Currency,
    pub totals: Totals,
    pub score: ScoreBreakdown,
    pub tip: ScoreTip,
    pub budget: BudgetProgress,
    pub next_month_savings: f64,
    /// Savings not yet committed to any goal.
    pub unallocated_savings: f64,
    pub breakdown: Vec<CategoryTotal>,
    pub achievements: Vec<Achievement>,
    pub recent_activity: Vec<ActivityEntry>,
    pub trend: TrendSeries,
}

impl Dashboard {
    /// `today` selects the month used for budget progress.
    pub fn build(data: &FinanceData, settings: &Settings, today: NaiveDate) -> Self {
        let totals = TotalsService::compute(&data.incomes, &data.expenses, &data.investments);
        let score = ScoreService::breakdown(&totals, settings.monthly_budget, &data.goals);
        let spent = BudgetService::month_expenses(&data.expenses, today);
        let budget = BudgetService::budget_progress(spent, settings.monthly_budget);
        let next_month_savings =
            BudgetService::estimated_next_month_savings(&data.expenses, &data.incomes, &totals);
        let unallocated_savings = GoalAllocator::from_totals(&totals).remaining(&data.goals);

        Self {
            currency: settings.currency,
            totals,
            score,
            tip: InsightService::score_tip(score.score),
            budget,
            next_month_savings,
            unallocated_savings,
            breakdown: InsightService::category_breakdown(&data.expenses),
            achievements: InsightService::achievements(&totals, score.score, &data.goals),
            recent_activity: InsightService::recent_activity(
                &data.expenses,
                &data.incomes,
                &data.investments,
                RECENT_ACTIVITY_LIMIT,
            ),
            trend: InsightService::income_expense_trend(
                &data.expenses,
                &data.incomes,
                TREND_WINDOW,
            ),
        }
    }
}
