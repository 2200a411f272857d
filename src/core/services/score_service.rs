//! SmartScore: a 0-100 blend of savings rate, budget adherence, and goal progress.

use serde::Serialize;

use crate::domain::GoalRecord;

use super::totals_service::Totals;

pub const SAVINGS_WEIGHT: f64 = 0.45;
pub const BUDGET_WEIGHT: f64 = 0.30;
pub const GOAL_WEIGHT: f64 = 0.25;

/// Goal component used when no goals exist.
pub const NEUTRAL_GOAL_SCORE: f64 = 0.5;

/// The three score components and the final integer score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub savings_rate: f64,
    pub budget_score: f64,
    pub goal_score: f64,
    pub raw: f64,
    pub score: u8,
}

pub struct ScoreService;

impl ScoreService {
    pub fn smart_score(totals: &Totals, monthly_budget: f64, goals: &[GoalRecord]) -> u8 {
        Self::breakdown(totals, monthly_budget, goals).score
    }

    pub fn breakdown(totals: &Totals, monthly_budget: f64, goals: &[GoalRecord]) -> ScoreBreakdown {
        let savings_rate = Self::savings_rate(totals);
        let budget_score = Self::budget_score(totals.total_expenses, monthly_budget);
        let goal_score = Self::goal_score(goals);
        let raw =
            SAVINGS_WEIGHT * savings_rate + BUDGET_WEIGHT * budget_score + GOAL_WEIGHT * goal_score;
        let score = Self::scale(raw);
        tracing::debug!(savings_rate, budget_score, goal_score, score, "computed smart score");
        ScoreBreakdown {
            savings_rate,
            budget_score,
            goal_score,
            raw,
            score,
        }
    }

    /// Share of income left after expenses and investments; 0 without income.
    pub fn savings_rate(totals: &Totals) -> f64 {
        if totals.total_income > 0.0 {
            (totals.net() / totals.total_income).max(0.0)
        } else {
            0.0
        }
    }

    /// 1.0 at or under budget, falling linearly to 0.0 at double the budget.
    /// An unset (zero) budget scores 1.0.
    pub fn budget_score(expenses: f64, monthly_budget: f64) -> f64 {
        if !(monthly_budget > 0.0) {
            return 1.0;
        }
        let overspend = (expenses - monthly_budget).max(0.0);
        (1.0 - overspend / monthly_budget).max(0.0)
    }

    /// Mean per-goal progress, or [`NEUTRAL_GOAL_SCORE`] without goals.
    pub fn goal_score(goals: &[GoalRecord]) -> f64 {
        if goals.is_empty() {
            return NEUTRAL_GOAL_SCORE;
        }
        let total: f64 = goals.iter().map(GoalRecord::progress).sum();
        total / goals.len() as f64
    }

    /// Scales to 0-100, rounds half to even, then clamps.
    fn scale(raw: f64) -> u8 {
        let rounded = (raw * 100.0).round_ties_even();
        // NaN saturates to 0 on the cast.
        rounded.clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_clamps_after_rounding() {
        assert_eq!(ScoreService::scale(1.2), 100);
        assert_eq!(ScoreService::scale(-0.3), 0);
        assert_eq!(ScoreService::scale(0.425), 42);
        assert_eq!(ScoreService::scale(0.435), 44);
        assert_eq!(ScoreService::scale(f64::NAN), 0);
    }
}
