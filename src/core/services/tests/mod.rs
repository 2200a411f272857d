mod score_service_tests;

use chrono::NaiveDate;

use crate::domain::{ExpenseCategory, ExpenseRecord, IncomeRecord, InvestmentRecord, InvestmentType};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub(super) fn expense(amount: f64, on: Option<NaiveDate>) -> ExpenseRecord {
    ExpenseRecord::new(on, ExpenseCategory::Food, "Groceries", amount)
}

pub(super) fn income(amount: f64, on: Option<NaiveDate>) -> IncomeRecord {
    IncomeRecord::new(on, "Salary", amount)
}

pub(super) fn investment(amount: f64, current_value: Option<f64>) -> InvestmentRecord {
    InvestmentRecord::new(None, InvestmentType::Stocks, amount, current_value)
}
