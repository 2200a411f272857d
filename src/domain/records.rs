//! Expense, income, and investment rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::*;
use super::labels::{ExpenseCategory, InvestmentType};

/// A single spending entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub date: Option<NaiveDate>,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: f64,
}

impl ExpenseRecord {
    pub fn new(
        date: Option<NaiveDate>,
        category: ExpenseCategory,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            category,
            description: description.into(),
            amount,
        }
    }
}

impl Identifiable for ExpenseRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for ExpenseRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Displayable for ExpenseRecord {
    fn display_label(&self) -> String {
        format!("{} ({})", self.description, self.category)
    }
}

/// A single income entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeRecord {
    pub id: Uuid,
    pub date: Option<NaiveDate>,
    pub source: String,
    pub amount: f64,
}

impl IncomeRecord {
    pub fn new(date: Option<NaiveDate>, source: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            source: source.into(),
            amount,
        }
    }
}

impl Identifiable for IncomeRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for IncomeRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for IncomeRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Displayable for IncomeRecord {
    fn display_label(&self) -> String {
        self.source.clone()
    }
}

/// A holding purchased for `amount` and currently valued at `current_value`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentRecord {
    pub id: Uuid,
    pub date: Option<NaiveDate>,
    pub kind: InvestmentType,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
}

impl InvestmentRecord {
    pub fn new(
        date: Option<NaiveDate>,
        kind: InvestmentType,
        amount: f64,
        current_value: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind,
            amount,
            current_value,
        }
    }

    /// Value counted towards totals: the current value when known, else the invested amount.
    pub fn effective_value(&self) -> f64 {
        self.current_value.unwrap_or(self.amount)
    }
}

impl Identifiable for InvestmentRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for InvestmentRecord {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Dated for InvestmentRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Displayable for InvestmentRecord {
    fn display_label(&self) -> String {
        self.kind.to_string()
    }
}
