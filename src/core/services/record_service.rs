//! Validated creation and removal of finance records.
//!
//! Validation covers presence and positivity only. A rejected submission never
//! produces a record.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::errors::FinanceError;
use crate::domain::{
    common::is_positive_amount, goal::find_goal_mut, ExpenseCategory, ExpenseRecord, GoalRecord,
    Identifiable, IncomeRecord, InvestmentRecord, InvestmentType,
};

use super::ServiceResult;

/// Whether an upsert touched an existing goal or appended a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

pub struct RecordService;

impl RecordService {
    pub fn new_expense(
        date: Option<NaiveDate>,
        category: ExpenseCategory,
        description: &str,
        amount: f64,
    ) -> ServiceResult<ExpenseRecord> {
        let description = description.trim();
        if description.is_empty() {
            return Err(FinanceError::validation(
                "expense description must not be empty",
            ));
        }
        require_positive("expense amount", amount)?;
        Ok(ExpenseRecord::new(date, category, description, amount))
    }

    pub fn new_income(
        date: Option<NaiveDate>,
        source: &str,
        amount: f64,
    ) -> ServiceResult<IncomeRecord> {
        let source = source.trim();
        if source.is_empty() {
            return Err(FinanceError::validation("income source must not be empty"));
        }
        require_positive("income amount", amount)?;
        Ok(IncomeRecord::new(date, source, amount))
    }

    /// A missing or zero current value defaults to the invested amount.
    pub fn new_investment(
        date: Option<NaiveDate>,
        kind: InvestmentType,
        amount: f64,
        current_value: Option<f64>,
    ) -> ServiceResult<InvestmentRecord> {
        require_positive("investment amount", amount)?;
        let current_value = match current_value {
            Some(value) if !value.is_finite() || value < 0.0 => {
                return Err(FinanceError::validation(
                    "current value must be zero or positive",
                ))
            }
            Some(value) if value > 0.0 => value,
            _ => amount,
        };
        Ok(InvestmentRecord::new(
            date,
            kind,
            amount,
            Some(current_value),
        ))
    }

    /// Creates the goal, or overwrites target, saved amount, and date of the
    /// goal with the same name.
    pub fn upsert_goal(
        goals: &mut Vec<GoalRecord>,
        name: &str,
        target_amount: f64,
        saved_so_far: f64,
        target_date: Option<NaiveDate>,
    ) -> ServiceResult<UpsertOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FinanceError::validation("goal name must not be empty"));
        }
        require_non_negative("target amount", target_amount)?;
        require_non_negative("saved amount", saved_so_far)?;

        if let Some(existing) = find_goal_mut(goals, name) {
            existing.target_amount = target_amount;
            existing.saved_so_far = saved_so_far;
            existing.target_date = target_date;
            tracing::info!(goal = name, "updated goal");
            return Ok(UpsertOutcome::Updated);
        }
        goals.push(GoalRecord::new(name, target_amount, saved_so_far, target_date));
        tracing::info!(goal = name, "created goal");
        Ok(UpsertOutcome::Created)
    }

    /// Removes the record with `id`, returning it.
    pub fn remove_by_id<T: Identifiable>(records: &mut Vec<T>, id: Uuid) -> ServiceResult<T> {
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(FinanceError::RecordNotFound(id))?;
        Ok(records.remove(position))
    }

    pub fn delete_expense(
        expenses: &mut Vec<ExpenseRecord>,
        id: Uuid,
    ) -> ServiceResult<ExpenseRecord> {
        let removed = Self::remove_by_id(expenses, id)?;
        tracing::info!(%id, amount = removed.amount, "deleted expense");
        Ok(removed)
    }
}

fn require_positive(field: &str, value: f64) -> ServiceResult<()> {
    if is_positive_amount(value) {
        Ok(())
    } else {
        Err(FinanceError::Validation(format!(
            "{field} must be greater than 0"
        )))
    }
}

fn require_non_negative(field: &str, value: f64) -> ServiceResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FinanceError::Validation(format!(
            "{field} must not be negative"
        )))
    }
}
