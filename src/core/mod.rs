//! Finance aggregation: totals, SmartScore, goal allocation, and the
//! supporting budget/insight calculations. Pure functions over in-memory
//! record collections; no I/O.

pub mod dashboard;
pub mod errors;
pub mod services;

pub use dashboard::Dashboard;
pub use errors::FinanceError;

use crate::domain::{ExpenseRecord, GoalRecord, IncomeRecord, InvestmentRecord};

/// The four record collections a page view operates on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinanceData {
    pub expenses: Vec<ExpenseRecord>,
    pub incomes: Vec<IncomeRecord>,
    pub investments: Vec<InvestmentRecord>,
    pub goals: Vec<GoalRecord>,
}
