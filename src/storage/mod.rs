//! Tabular persistence for the finance records.
//!
//! Each table is loaded whole and written whole. Loads hand back a
//! [`Revision`] fingerprint; saves that pass it fail with
//! [`PersistenceError::Conflict`] when the file changed in between.

pub mod csv_backend;

use std::{
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    io,
};

use thiserror::Error;

use crate::{
    core::FinanceData,
    domain::{ExpenseRecord, GoalRecord, IncomeRecord, InvestmentRecord},
};

pub use csv_backend::CsvStorage;

pub type Result<T> = std::result::Result<T, PersistenceError>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{table} changed on disk (loaded at {expected}, now {found}); reload and retry")]
    Conflict {
        table: &'static str,
        expected: Revision,
        found: Revision,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Content fingerprint of a stored table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Revision(pub u64);

impl Revision {
    /// Revision of a table file that does not exist yet.
    pub const MISSING: Revision = Revision(0);

    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        // keep 0 reserved for missing files
        Revision(hasher.finish().max(1))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// The four record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Expenses,
    Incomes,
    Investments,
    Goals,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Expenses,
        TableKind::Incomes,
        TableKind::Investments,
        TableKind::Goals,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TableKind::Expenses => "expenses",
            TableKind::Incomes => "incomes",
            TableKind::Investments => "investments",
            TableKind::Goals => "goals",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.csv", self.name())
    }

    pub fn header(self) -> &'static [&'static str] {
        match self {
            TableKind::Expenses => &["Id", "Date", "Category", "Description", "Amount"],
            TableKind::Incomes => &["Id", "Date", "Source", "Amount"],
            TableKind::Investments => &["Id", "Date", "Type", "Amount", "CurrentValue"],
            TableKind::Goals => &["Name", "TargetAmount", "SavedSoFar", "TargetDate"],
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows of one table plus the revision they were read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<T> {
    pub rows: Vec<T>,
    pub revision: Revision,
    /// Rows that had no stored id and were given a fresh one on load.
    pub assigned_ids: usize,
}

impl<T> Table<T> {
    pub fn needs_migration(&self) -> bool {
        self.assigned_ids > 0
    }
}

/// Abstraction over persistence backends for the finance tables.
///
/// `expected` carries the revision a table was loaded at; `None` overwrites
/// unconditionally. Successful saves return the new revision.
pub trait RecordStorage: Send + Sync {
    fn ensure_files(&self) -> Result<()>;

    fn load_expenses(&self) -> Result<Table<ExpenseRecord>>;
    fn save_expenses(&self, rows: &[ExpenseRecord], expected: Option<Revision>) -> Result<Revision>;

    fn load_incomes(&self) -> Result<Table<IncomeRecord>>;
    fn save_incomes(&self, rows: &[IncomeRecord], expected: Option<Revision>) -> Result<Revision>;

    fn load_investments(&self) -> Result<Table<InvestmentRecord>>;
    fn save_investments(
        &self,
        rows: &[InvestmentRecord],
        expected: Option<Revision>,
    ) -> Result<Revision>;

    fn load_goals(&self) -> Result<Table<GoalRecord>>;
    fn save_goals(&self, rows: &[GoalRecord], expected: Option<Revision>) -> Result<Revision>;

    /// Backup file names for a table, newest first.
    fn list_backups(&self, table: TableKind) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revisions {
    pub expenses: Revision,
    pub incomes: Revision,
    pub investments: Revision,
    pub goals: Revision,
}

/// All four tables read together for one page view.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub data: FinanceData,
    pub revisions: Revisions,
}

impl Snapshot {
    pub fn load(storage: &dyn RecordStorage) -> Result<Self> {
        let expenses = storage.load_expenses()?;
        let incomes = storage.load_incomes()?;
        let investments = storage.load_investments()?;
        let goals = storage.load_goals()?;
        tracing::debug!(
            expenses = expenses.rows.len(),
            incomes = incomes.rows.len(),
            investments = investments.rows.len(),
            goals = goals.rows.len(),
            "loaded snapshot"
        );
        Ok(Self {
            revisions: Revisions {
                expenses: expenses.revision,
                incomes: incomes.revision,
                investments: investments.revision,
                goals: goals.revision,
            },
            data: FinanceData {
                expenses: expenses.rows,
                incomes: incomes.rows,
                investments: investments.rows,
                goals: goals.rows,
            },
        })
    }
}
