//! Derived dashboard views: category breakdown, score tips, achievements,
//! recent activity, and the income/expense trend.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{ExpenseCategory, ExpenseRecord, GoalRecord, IncomeRecord, InvestmentRecord};

use super::totals_service::Totals;

pub const FIRST_MILESTONE: f64 = 10_000.0;
pub const EXCELLENT_SCORE: u8 = 80;
pub const GOOD_SCORE: u8 = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreTip {
    NeedsWork,
    Good,
    Excellent,
}

impl fmt::Display for ScoreTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ScoreTip::NeedsWork => {
                "Tip: try reducing spending or increasing savings to boost your score."
            }
            ScoreTip::Good => "You're doing good! A little more savings can make it great.",
            ScoreTip::Excellent => "Amazing! You're handling money like a pro!",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Achievement {
    SavedFirstTenK,
    ExcellentScore,
    AllGoalsCompleted,
    /// A warning rather than a badge.
    ExpensesExceedIncome,
}

impl Achievement {
    pub fn is_warning(self) -> bool {
        matches!(self, Achievement::ExpensesExceedIncome)
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Achievement::SavedFirstTenK => "Saved first 10k!",
            Achievement::ExcellentScore => "Excellent SmartScore!",
            Achievement::AllGoalsCompleted => "All goals completed!",
            Achievement::ExpensesExceedIncome => "Expenses exceeded income!",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityKind {
    Income,
    Expense,
    Investment,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActivityKind::Income => "Income",
            ActivityKind::Expense => "Expense",
            ActivityKind::Investment => "Investment",
        };
        f.write_str(label)
    }
}

/// One row of the merged recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub date: Option<NaiveDate>,
    pub label: String,
    pub amount: f64,
}

/// Paired recent amounts for the income-versus-expenses chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub expenses: Vec<f64>,
    pub incomes: Vec<f64>,
}

pub struct InsightService;

impl InsightService {
    /// Spending per category, largest first; ties ordered by category label.
    pub fn category_breakdown(expenses: &[ExpenseRecord]) -> Vec<CategoryTotal> {
        let mut sums: HashMap<&ExpenseCategory, f64> = HashMap::new();
        for expense in expenses {
            *sums.entry(&expense.category).or_insert(0.0) += expense.amount;
        }
        let mut breakdown: Vec<CategoryTotal> = sums
            .into_iter()
            .map(|(category, amount)| CategoryTotal {
                category: category.clone(),
                amount,
            })
            .collect();
        breakdown.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.category.label().cmp(b.category.label()))
        });
        breakdown
    }

    pub fn score_tip(score: u8) -> ScoreTip {
        if score < GOOD_SCORE {
            ScoreTip::NeedsWork
        } else if score < EXCELLENT_SCORE {
            ScoreTip::Good
        } else {
            ScoreTip::Excellent
        }
    }

    pub fn achievements(totals: &Totals, score: u8, goals: &[GoalRecord]) -> Vec<Achievement> {
        let mut earned = Vec::new();
        if totals.total_savings >= FIRST_MILESTONE {
            earned.push(Achievement::SavedFirstTenK);
        }
        if score >= EXCELLENT_SCORE {
            earned.push(Achievement::ExcellentScore);
        }
        if !goals.is_empty() && goals.iter().all(GoalRecord::is_complete) {
            earned.push(Achievement::AllGoalsCompleted);
        }
        if totals.total_expenses > totals.total_income {
            earned.push(Achievement::ExpensesExceedIncome);
        }
        earned
    }

    /// Newest first; undated entries sort last.
    pub fn recent_activity(
        expenses: &[ExpenseRecord],
        incomes: &[IncomeRecord],
        investments: &[InvestmentRecord],
        limit: usize,
    ) -> Vec<ActivityEntry> {
        let mut entries: Vec<ActivityEntry> = incomes
            .iter()
            .map(|income| ActivityEntry {
                id: income.id,
                kind: ActivityKind::Income,
                date: income.date,
                label: income.source.clone(),
                amount: income.amount,
            })
            .chain(expenses.iter().map(|expense| ActivityEntry {
                id: expense.id,
                kind: ActivityKind::Expense,
                date: expense.date,
                label: expense.description.clone(),
                amount: expense.amount,
            }))
            .chain(investments.iter().map(|investment| ActivityEntry {
                id: investment.id,
                kind: ActivityKind::Investment,
                date: investment.date,
                label: investment.kind.to_string(),
                amount: investment.amount,
            }))
            .collect();
        // Stable sort keeps table order among equal dates.
        entries.sort_by(|a, b| match (a.date, b.date) {
            (Some(left), Some(right)) => right.cmp(&left),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        entries.truncate(limit);
        entries
    }

    /// The last `window` amounts of each table in stored order, zero-padded at
    /// the end so both series have equal length.
    pub fn income_expense_trend(
        expenses: &[ExpenseRecord],
        incomes: &[IncomeRecord],
        window: usize,
    ) -> TrendSeries {
        let mut expense_tail = tail(expenses.iter().map(|e| e.amount).collect(), window);
        let mut income_tail = tail(incomes.iter().map(|i| i.amount).collect(), window);
        let len = expense_tail.len().max(income_tail.len());
        expense_tail.resize(len, 0.0);
        income_tail.resize(len, 0.0);
        TrendSeries {
            expenses: expense_tail,
            incomes: income_tail,
        }
    }
}

fn tail(values: Vec<f64>, window: usize) -> Vec<f64> {
    let skip = values.len().saturating_sub(window);
    values.into_iter().skip(skip).collect()
}
