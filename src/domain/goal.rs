//! Savings goals keyed by name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::common::{Displayable, NamedEntity};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalRecord {
    pub name: String,
    pub target_amount: f64,
    pub saved_so_far: f64,
    pub target_date: Option<NaiveDate>,
}

impl GoalRecord {
    pub fn new(
        name: impl Into<String>,
        target_amount: f64,
        saved_so_far: f64,
        target_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            name: name.into(),
            target_amount,
            saved_so_far,
            target_date,
        }
    }

    /// Fraction of the target reached, saturating at 1.0. A goal without a
    /// positive target counts as fully reached.
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            1.0
        } else {
            (self.saved_so_far / self.target_amount).min(1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.saved_so_far >= self.target_amount
    }

    pub fn outstanding(&self) -> f64 {
        (self.target_amount - self.saved_so_far).max(0.0)
    }
}

impl NamedEntity for GoalRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for GoalRecord {
    fn display_label(&self) -> String {
        format!("{} ({:.0}%)", self.name, self.progress() * 100.0)
    }
}

/// Finds a goal by exact name.
pub fn find_goal_mut<'a>(goals: &'a mut [GoalRecord], name: &str) -> Option<&'a mut GoalRecord> {
    goals.iter_mut().find(|goal| goal.name() == name)
}
