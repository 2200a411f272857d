//! Moves available savings into goals from a single shared pool.
//!
//! The pool is `available_savings - sum(saved_so_far)`, recomputed from the goal
//! collection on every request, so each accepted allocation lowers the ceiling
//! for the next one by exactly its amount. Rejections leave every goal untouched.
//! Pool arithmetic is done in whole cents.

use std::fmt;

use serde::Serialize;

use crate::domain::{goal::find_goal_mut, GoalRecord};

use super::totals_service::Totals;

/// Why an allocation request was turned down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AllocationRejection {
    InvalidAmount,
    InsufficientSavings { requested: f64, remaining: f64 },
    UnknownGoal(String),
}

impl fmt::Display for AllocationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationRejection::InvalidAmount => f.write_str("enter an amount greater than 0"),
            AllocationRejection::InsufficientSavings {
                requested,
                remaining,
            } => write!(
                f,
                "not enough remaining savings: requested {requested:.2}, \
                 at most {remaining:.2} can be allocated"
            ),
            AllocationRejection::UnknownGoal(name) => write!(f, "no goal named `{name}`"),
        }
    }
}

/// Outcome of one allocation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub accepted: bool,
    pub reason: Option<AllocationRejection>,
    pub updated_goal: Option<GoalRecord>,
    /// Pool left after this request (unchanged on rejection).
    pub remaining_savings: f64,
}

impl AllocationResult {
    fn accepted(goal: GoalRecord, remaining_savings: f64) -> Self {
        Self {
            accepted: true,
            reason: None,
            updated_goal: Some(goal),
            remaining_savings,
        }
    }

    fn rejected(reason: AllocationRejection, remaining_savings: f64) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
            updated_goal: None,
            remaining_savings,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRequest {
    pub goal_name: String,
    pub amount: f64,
}

impl AllocationRequest {
    pub fn new(goal_name: impl Into<String>, amount: f64) -> Self {
        Self {
            goal_name: goal_name.into(),
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalAllocator {
    available_savings: f64,
}

impl GoalAllocator {
    pub fn new(available_savings: f64) -> Self {
        Self {
            available_savings: available_savings.max(0.0),
        }
    }

    pub fn from_totals(totals: &Totals) -> Self {
        Self::new(totals.total_savings)
    }

    pub fn available_savings(&self) -> f64 {
        self.available_savings
    }

    pub fn remaining(&self, goals: &[GoalRecord]) -> f64 {
        from_cents(self.remaining_cents(goals))
    }

    fn remaining_cents(&self, goals: &[GoalRecord]) -> i64 {
        let allocated: i64 = goals.iter().map(|goal| to_cents(goal.saved_so_far)).sum();
        (to_cents(self.available_savings) - allocated).max(0)
    }

    /// Adds `amount` to the named goal's saved balance when the shared pool allows it.
    pub fn allocate(
        &self,
        goals: &mut [GoalRecord],
        goal_name: &str,
        amount: f64,
    ) -> AllocationResult {
        let remaining_cents = self.remaining_cents(goals);
        let remaining = from_cents(remaining_cents);
        if !(amount > 0.0) || !amount.is_finite() {
            return AllocationResult::rejected(AllocationRejection::InvalidAmount, remaining);
        }
        let amount_cents = to_cents(amount);
        if amount_cents > remaining_cents {
            tracing::info!(
                goal = goal_name,
                amount,
                remaining,
                "allocation exceeds remaining savings"
            );
            return AllocationResult::rejected(
                AllocationRejection::InsufficientSavings {
                    requested: amount,
                    remaining,
                },
                remaining,
            );
        }
        let Some(goal) = find_goal_mut(goals, goal_name) else {
            return AllocationResult::rejected(
                AllocationRejection::UnknownGoal(goal_name.to_string()),
                remaining,
            );
        };
        goal.saved_so_far += amount;
        let updated = goal.clone();
        tracing::info!(
            goal = goal_name,
            amount,
            saved = updated.saved_so_far,
            "allocated savings to goal"
        );
        AllocationResult::accepted(updated, from_cents((remaining_cents - amount_cents).max(0)))
    }

    /// Applies requests in order against the same pool.
    pub fn allocate_batch(
        &self,
        goals: &mut [GoalRecord],
        requests: &[AllocationRequest],
    ) -> Vec<AllocationResult> {
        requests
            .iter()
            .map(|request| self.allocate(goals, &request.goal_name, request.amount))
            .collect()
    }
}

fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}
