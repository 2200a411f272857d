//! Monthly budget tracking and month-bucketed averages.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{Amounted, Dated, ExpenseRecord, IncomeRecord};

use super::totals_service::Totals;

/// Share of the budget above which spending is flagged as close to the limit.
pub const NEAR_LIMIT_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetStatus {
    Unset,
    OnTrack,
    NearLimit,
    OverBudget,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub spent: f64,
    pub budget: f64,
    /// Fraction of the budget used, capped at 1.0 (0.0 when unset).
    pub used: f64,
    pub status: BudgetStatus,
}

/// Calendar month key, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

pub struct BudgetService;

impl BudgetService {
    /// Spending dated within the month of `reference`. Undated expenses are excluded.
    pub fn month_expenses(expenses: &[ExpenseRecord], reference: NaiveDate) -> f64 {
        let wanted = YearMonth::of(reference);
        expenses
            .iter()
            .filter(|expense| expense.date.map(YearMonth::of) == Some(wanted))
            .map(|expense| expense.amount)
            .sum()
    }

    pub fn budget_progress(spent: f64, budget: f64) -> BudgetProgress {
        if !(budget > 0.0) {
            return BudgetProgress {
                spent,
                budget: 0.0,
                used: 0.0,
                status: BudgetStatus::Unset,
            };
        }
        let status = if spent > budget {
            BudgetStatus::OverBudget
        } else if spent > NEAR_LIMIT_RATIO * budget {
            BudgetStatus::NearLimit
        } else {
            BudgetStatus::OnTrack
        };
        BudgetProgress {
            spent,
            budget,
            used: (spent / budget).min(1.0),
            status,
        }
    }

    /// Per-month sums in chronological order. Undated records are skipped.
    pub fn monthly_totals<T: Amounted + Dated>(records: &[T]) -> Vec<(YearMonth, f64)> {
        let mut buckets: BTreeMap<YearMonth, f64> = BTreeMap::new();
        for record in records {
            if let Some(date) = record.date() {
                *buckets.entry(YearMonth::of(date)).or_insert(0.0) += record.amount();
            }
        }
        buckets.into_iter().collect()
    }

    /// Mean of the per-month sums; 0.0 when no record is dated.
    pub fn average_monthly<T: Amounted + Dated>(records: &[T]) -> f64 {
        let months = Self::monthly_totals(records);
        if months.is_empty() {
            return 0.0;
        }
        months.iter().map(|(_, total)| total).sum::<f64>() / months.len() as f64
    }

    /// Average monthly income minus average monthly spending minus the current
    /// investment value, floored at zero.
    pub fn estimated_next_month_savings(
        expenses: &[ExpenseRecord],
        incomes: &[IncomeRecord],
        totals: &Totals,
    ) -> f64 {
        let estimate = Self::average_monthly(incomes)
            - Self::average_monthly(expenses)
            - totals.total_investment_value;
        estimate.max(0.0)
    }
}
