//! Pure record types for the finance tables. No I/O.

pub mod common;
pub mod goal;
pub mod labels;
pub mod records;

pub use common::{Amounted, Dated, Displayable, Identifiable, NamedEntity};
pub use goal::GoalRecord;
pub use labels::{ExpenseCategory, InvestmentType};
pub use records::{ExpenseRecord, IncomeRecord, InvestmentRecord};
