//! Aggregate sums over the income, expense, and investment tables.

use serde::Serialize;

use crate::domain::{Amounted, ExpenseRecord, IncomeRecord, InvestmentRecord};

/// Aggregate figures shown on the dashboard overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_investment_value: f64,
    /// Available savings, floored at zero.
    pub total_savings: f64,
}

impl Totals {
    pub fn from_parts(total_income: f64, total_expenses: f64, total_investment_value: f64) -> Self {
        let net = total_income - total_expenses - total_investment_value;
        Self {
            total_income,
            total_expenses,
            total_investment_value,
            total_savings: net.max(0.0),
        }
    }

    /// Income minus expenses minus investment value, without the zero floor.
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expenses - self.total_investment_value
    }
}

pub struct TotalsService;

impl TotalsService {
    pub fn compute(
        incomes: &[IncomeRecord],
        expenses: &[ExpenseRecord],
        investments: &[InvestmentRecord],
    ) -> Totals {
        let totals = Totals::from_parts(
            sum_amounts(incomes),
            sum_amounts(expenses),
            Self::investment_value(investments),
        );
        tracing::debug!(
            income = totals.total_income,
            expenses = totals.total_expenses,
            investments = totals.total_investment_value,
            savings = totals.total_savings,
            "recomputed totals"
        );
        totals
    }

    /// Sums each holding's current value, falling back to the invested amount
    /// for holdings without one.
    pub fn investment_value(investments: &[InvestmentRecord]) -> f64 {
        investments
            .iter()
            .map(InvestmentRecord::effective_value)
            .sum()
    }
}

pub fn sum_amounts<T: Amounted>(records: &[T]) -> f64 {
    records.iter().map(Amounted::amount).sum()
}
