use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    domain::{
        common::{format_date_cell, parse_amount_cell, parse_date_lenient},
        goal::find_goal_mut,
        ExpenseCategory, ExpenseRecord, GoalRecord, IncomeRecord, InvestmentRecord,
        InvestmentType,
    },
    utils::paths,
};

use super::{PersistenceError, RecordStorage, Result, Revision, Table, TableKind};

const BACKUP_EXTENSION: &str = "csv";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Flat CSV files, one per table, under a single data directory.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    root: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl CsvStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(paths::app_data_dir);
        fs::create_dir_all(&root)?;
        let backups_dir = paths::backups_root_in(&root);
        Ok(Self {
            root,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self, table: TableKind) -> PathBuf {
        self.root.join(table.file_name())
    }

    fn backup_dir(&self, table: TableKind) -> PathBuf {
        self.backups_dir.join(table.name())
    }

    fn load_table<T, F>(&self, table: TableKind, mut parse: F) -> Result<(Vec<T>, Revision)>
    where
        F: FnMut(&Columns, &StringRecord, u64) -> Option<T>,
    {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok((Vec::new(), Revision::MISSING));
        }
        let bytes = fs::read(&path)?;
        let revision = Revision::of(&bytes);
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(bytes.as_slice());
        let columns = Columns::from_headers(reader.headers()?);

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    warn!(%table, %err, "skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line = record.position().map_or(0, |pos| pos.line());
            match parse(&columns, &record, line) {
                Some(row) => rows.push(row),
                None => skipped += 1,
            }
        }
        debug!(%table, rows = rows.len(), skipped, %revision, "loaded table");
        Ok((rows, revision))
    }

    fn save_table<R, I>(
        &self,
        table: TableKind,
        rows: I,
        expected: Option<Revision>,
    ) -> Result<Revision>
    where
        R: Serialize,
        I: IntoIterator<Item = R>,
    {
        let path = self.table_path(table);
        let found = current_revision(&path)?;
        if let Some(expected) = expected {
            if expected != found {
                warn!(%table, %expected, %found, "refusing to overwrite a table changed on disk");
                return Err(PersistenceError::Conflict {
                    table: table.name(),
                    expected,
                    found,
                });
            }
        }

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(table.header())?;
        let mut count = 0usize;
        for row in rows {
            writer.serialize(row)?;
            count += 1;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| PersistenceError::Storage(err.to_string()))?;

        self.backup_existing_file(table, &path)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &bytes)?;
        fs::rename(&tmp, &path)?;
        info!(%table, rows = count, "saved table");
        Ok(Revision::of(&bytes))
    }

    fn backup_existing_file(&self, table: TableKind, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(table);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!("{}_{}.{}", table.name(), timestamp, BACKUP_EXTENSION);
        fs::copy(path, dir.join(&backup_name))?;
        self.prune_backups(table)
    }

    fn prune_backups(&self, table: TableKind) -> Result<()> {
        let backups = self.list_backups(table)?;
        for name in backups.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(self.backup_dir(table).join(name)) {
                warn!(%table, backup = %name, %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl RecordStorage for CsvStorage {
    fn ensure_files(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        for table in TableKind::ALL {
            let path = self.table_path(table);
            if path.exists() {
                continue;
            }
            let mut writer = WriterBuilder::new().from_writer(Vec::new());
            writer.write_record(table.header())?;
            let bytes = writer
                .into_inner()
                .map_err(|err| PersistenceError::Storage(err.to_string()))?;
            write_atomic(&path, &bytes)?;
            debug!(%table, path = %path.display(), "created table file");
        }
        Ok(())
    }

    fn load_expenses(&self) -> Result<Table<ExpenseRecord>> {
        let table = TableKind::Expenses;
        let mut assigned_ids = 0;
        let (rows, revision) = self.load_table(table, |columns, record, line| {
            let amount = required_amount(table, line, "Amount", columns.get(record, "Amount"))?;
            // Older files carry the text in a `Note` column.
            let description = match columns.get(record, "Description") {
                "" => columns.get(record, "Note"),
                text => text,
            };
            Some(ExpenseRecord {
                id: parse_id(table, line, columns.get(record, "Id"), &mut assigned_ids),
                date: parse_date_lenient(columns.get(record, "Date")),
                category: ExpenseCategory::from_label(columns.get(record, "Category")),
                description: description.to_string(),
                amount,
            })
        })?;
        Ok(Table {
            rows,
            revision,
            assigned_ids,
        })
    }

    fn save_expenses(
        &self,
        rows: &[ExpenseRecord],
        expected: Option<Revision>,
    ) -> Result<Revision> {
        self.save_table(TableKind::Expenses, rows.iter().map(ExpenseRow::from), expected)
    }

    fn load_incomes(&self) -> Result<Table<IncomeRecord>> {
        let table = TableKind::Incomes;
        let mut assigned_ids = 0;
        let (rows, revision) = self.load_table(table, |columns, record, line| {
            let amount = required_amount(table, line, "Amount", columns.get(record, "Amount"))?;
            Some(IncomeRecord {
                id: parse_id(table, line, columns.get(record, "Id"), &mut assigned_ids),
                date: parse_date_lenient(columns.get(record, "Date")),
                source: columns.get(record, "Source").to_string(),
                amount,
            })
        })?;
        Ok(Table {
            rows,
            revision,
            assigned_ids,
        })
    }

    fn save_incomes(&self, rows: &[IncomeRecord], expected: Option<Revision>) -> Result<Revision> {
        self.save_table(TableKind::Incomes, rows.iter().map(IncomeRow::from), expected)
    }

    fn load_investments(&self) -> Result<Table<InvestmentRecord>> {
        let table = TableKind::Investments;
        let mut assigned_ids = 0;
        let (rows, revision) = self.load_table(table, |columns, record, line| {
            let amount = required_amount(table, line, "Amount", columns.get(record, "Amount"))?;
            Some(InvestmentRecord {
                id: parse_id(table, line, columns.get(record, "Id"), &mut assigned_ids),
                date: parse_date_lenient(columns.get(record, "Date")),
                kind: InvestmentType::from_label(columns.get(record, "Type")),
                amount,
                current_value: optional_amount(
                    table,
                    line,
                    "CurrentValue",
                    columns.get(record, "CurrentValue"),
                ),
            })
        })?;
        Ok(Table {
            rows,
            revision,
            assigned_ids,
        })
    }

    fn save_investments(
        &self,
        rows: &[InvestmentRecord],
        expected: Option<Revision>,
    ) -> Result<Revision> {
        self.save_table(
            TableKind::Investments,
            rows.iter().map(InvestmentRow::from),
            expected,
        )
    }

    fn load_goals(&self) -> Result<Table<GoalRecord>> {
        let table = TableKind::Goals;
        let (rows, revision) = self.load_table(table, |columns, record, line| {
            let name = columns.get(record, "Name");
            if name.is_empty() {
                warn!(%table, line, "skipping goal without a name");
                return None;
            }
            let target_amount = required_amount(
                table,
                line,
                "TargetAmount",
                columns.get(record, "TargetAmount"),
            )?;
            let saved_so_far =
                optional_amount(table, line, "SavedSoFar", columns.get(record, "SavedSoFar"))
                    .unwrap_or(0.0);
            Some(GoalRecord::new(
                name,
                target_amount,
                saved_so_far,
                parse_date_lenient(columns.get(record, "TargetDate")),
            ))
        })?;
        Ok(Table {
            rows: merge_duplicate_goals(rows),
            revision,
            assigned_ids: 0,
        })
    }

    fn save_goals(&self, rows: &[GoalRecord], expected: Option<Revision>) -> Result<Revision> {
        self.save_table(TableKind::Goals, rows.iter().map(GoalRow::from), expected)
    }

    fn list_backups(&self, table: TableKind) -> Result<Vec<String>> {
        let dir = self.backup_dir(table);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        // Fixed-width timestamps sort chronologically as text.
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }
}

/// Case-insensitive header lookup; the first column with a given name wins.
struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut index = HashMap::new();
        for (position, name) in headers.iter().enumerate() {
            index
                .entry(name.trim().to_ascii_lowercase())
                .or_insert(position);
        }
        Columns(index)
    }

    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> &'r str {
        self.0
            .get(&name.to_ascii_lowercase())
            .and_then(|&position| record.get(position))
            .unwrap_or("")
    }
}

fn parse_id(table: TableKind, line: u64, raw: &str, assigned: &mut usize) -> Uuid {
    if let Ok(id) = Uuid::parse_str(raw) {
        return id;
    }
    if !raw.is_empty() {
        warn!(%table, line, value = raw, "replacing malformed id");
    }
    *assigned += 1;
    Uuid::new_v4()
}

fn required_amount(table: TableKind, line: u64, column: &str, raw: &str) -> Option<f64> {
    match parse_amount_cell(raw) {
        Ok(Some(value)) if value >= 0.0 => Some(value),
        Ok(Some(value)) => {
            warn!(%table, line, column, value, "skipping row with negative amount");
            None
        }
        Ok(None) => {
            warn!(%table, line, column, "skipping row with missing amount");
            None
        }
        Err(text) => {
            warn!(%table, line, column, value = %text, "skipping row with unparseable amount");
            None
        }
    }
}

/// Blank cells and bad values read as missing; the row is kept.
fn optional_amount(table: TableKind, line: u64, column: &str, raw: &str) -> Option<f64> {
    match parse_amount_cell(raw) {
        Ok(Some(value)) if value >= 0.0 => Some(value),
        Ok(None) => None,
        Ok(Some(_)) | Err(_) => {
            warn!(%table, line, column, value = raw, "ignoring invalid amount");
            None
        }
    }
}

fn current_revision(path: &Path) -> Result<Revision> {
    if path.exists() {
        Ok(Revision::of(&fs::read(path)?))
    } else {
        Ok(Revision::MISSING)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}

/// Goal names are unique; a repeated name keeps its first position and takes
/// the values of its last row.
fn merge_duplicate_goals(rows: Vec<GoalRecord>) -> Vec<GoalRecord> {
    let mut goals: Vec<GoalRecord> = Vec::with_capacity(rows.len());
    for goal in rows {
        match find_goal_mut(&mut goals, &goal.name) {
            Some(existing) => {
                warn!(name = %goal.name, "duplicate goal name, keeping the last row");
                *existing = goal;
            }
            None => goals.push(goal),
        }
    }
    goals
}

#[derive(Serialize)]
struct ExpenseRow<'a> {
    id: String,
    date: String,
    category: &'a str,
    description: &'a str,
    amount: f64,
}

impl<'a> From<&'a ExpenseRecord> for ExpenseRow<'a> {
    fn from(record: &'a ExpenseRecord) -> Self {
        Self {
            id: record.id.to_string(),
            date: format_date_cell(record.date),
            category: record.category.label(),
            description: &record.description,
            amount: record.amount,
        }
    }
}

#[derive(Serialize)]
struct IncomeRow<'a> {
    id: String,
    date: String,
    source: &'a str,
    amount: f64,
}

impl<'a> From<&'a IncomeRecord> for IncomeRow<'a> {
    fn from(record: &'a IncomeRecord) -> Self {
        Self {
            id: record.id.to_string(),
            date: format_date_cell(record.date),
            source: &record.source,
            amount: record.amount,
        }
    }
}

#[derive(Serialize)]
struct InvestmentRow<'a> {
    id: String,
    date: String,
    kind: &'a str,
    amount: f64,
    current_value: Option<f64>,
}

impl<'a> From<&'a InvestmentRecord> for InvestmentRow<'a> {
    fn from(record: &'a InvestmentRecord) -> Self {
        Self {
            id: record.id.to_string(),
            date: format_date_cell(record.date),
            kind: record.kind.label(),
            amount: record.amount,
            current_value: record.current_value,
        }
    }
}

#[derive(Serialize)]
struct GoalRow<'a> {
    name: &'a str,
    target_amount: f64,
    saved_so_far: f64,
    target_date: String,
}

impl<'a> From<&'a GoalRecord> for GoalRow<'a> {
    fn from(record: &'a GoalRecord) -> Self {
        Self {
            name: &record.name,
            target_amount: record.target_amount,
            saved_so_far: record.saved_so_far,
            target_date: format_date_cell(record.target_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn storage(dir: &Path) -> CsvStorage {
        CsvStorage::new(Some(dir.to_path_buf()), None).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn ensure_files_writes_headers_once() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        store.ensure_files().unwrap();
        let header = fs::read_to_string(store.table_path(TableKind::Expenses)).unwrap();
        assert_eq!(header.trim_end(), "Id,Date,Category,Description,Amount");
        let goals = fs::read_to_string(store.table_path(TableKind::Goals)).unwrap();
        assert_eq!(goals.trim_end(), "Name,TargetAmount,SavedSoFar,TargetDate");

        fs::write(
            store.table_path(TableKind::Incomes),
            "Id,Date,Source,Amount\n,,Gift,5\n",
        )
        .unwrap();
        store.ensure_files().unwrap();
        assert_eq!(store.load_incomes().unwrap().rows.len(), 1);
    }

    #[test]
    fn missing_tables_load_empty() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        let table = store.load_goals().unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.revision, Revision::MISSING);
    }

    #[test]
    fn expenses_round_trip() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        let rows = vec![
            ExpenseRecord::new(date(2024, 1, 5), ExpenseCategory::Food, "Lunch, with team", 12.5),
            ExpenseRecord::new(None, ExpenseCategory::Custom("Pets".into()), "Vet", 80.0),
        ];
        let revision = store.save_expenses(&rows, None).unwrap();
        let loaded = store.load_expenses().unwrap();
        assert_eq!(loaded.rows, rows);
        assert_eq!(loaded.revision, revision);
        assert!(!loaded.needs_migration());
    }

    #[test]
    fn legacy_expenses_without_ids_use_note_column() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        fs::write(
            store.table_path(TableKind::Expenses),
            "Date,Category,Note,Amount\n\
             2024-01-05 00:00:00,food,Lunch,12.5\n\
             2024-02-01,Bills,Power,40\n",
        )
        .unwrap();

        let loaded = store.load_expenses().unwrap();
        assert_eq!(loaded.assigned_ids, 2);
        assert_eq!(loaded.rows[0].description, "Lunch");
        assert_eq!(loaded.rows[0].date, date(2024, 1, 5));
        assert_eq!(loaded.rows[0].category, ExpenseCategory::Food);

        store.save_expenses(&loaded.rows, Some(loaded.revision)).unwrap();
        let migrated = store.load_expenses().unwrap();
        assert_eq!(migrated.assigned_ids, 0);
        assert_eq!(migrated.rows, loaded.rows);
    }

    #[test]
    fn description_falls_back_to_note_per_row() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        fs::write(
            store.table_path(TableKind::Expenses),
            "Date,Category,Description,Amount,Note\n\
             2024-01-05,Food,,10,Old text\n\
             2024-01-06,Food,New text,11,ignored\n",
        )
        .unwrap();
        let rows = store.load_expenses().unwrap().rows;
        assert_eq!(rows[0].description, "Old text");
        assert_eq!(rows[1].description, "New text");
    }

    #[test]
    fn bad_amount_rows_are_skipped() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        fs::write(
            store.table_path(TableKind::Incomes),
            "Date,Source,Amount\n\
             2024-01-01,Salary,5000\n\
             2024-01-02,Typo,abc\n\
             2024-01-03,Refund,-20\n\
             2024-01-04,Blank,\n\
             \n\
             2024-01-05,Bonus,250\n",
        )
        .unwrap();
        let rows = store.load_incomes().unwrap().rows;
        let sources: Vec<&str> = rows.iter().map(|row| row.source.as_str()).collect();
        assert_eq!(sources, vec!["Salary", "Bonus"]);
    }

    #[test]
    fn investments_tolerate_missing_current_value() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        fs::write(
            store.table_path(TableKind::Investments),
            "Date,Type,Amount\n2024-01-01,Stocks,100\n",
        )
        .unwrap();
        let rows = store.load_investments().unwrap().rows;
        assert_eq!(rows[0].current_value, None);
        assert_eq!(rows[0].effective_value(), 100.0);

        fs::write(
            store.table_path(TableKind::Investments),
            "Date,Type,Amount,CurrentValue\n2024-01-01,Mutual Funds,100,\n2024-01-02,Gold,50,75\n",
        )
        .unwrap();
        let rows = store.load_investments().unwrap().rows;
        assert_eq!(rows[0].kind, InvestmentType::MutualFunds);
        assert_eq!(rows[0].current_value, None);
        assert_eq!(rows[1].current_value, Some(75.0));

        let revision = store.save_investments(&rows, None).unwrap();
        let reloaded = store.load_investments().unwrap();
        assert_eq!(reloaded.rows, rows);
        assert_eq!(reloaded.revision, revision);
    }

    #[test]
    fn goals_round_trip_and_default_saved_amount() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        fs::write(
            store.table_path(TableKind::Goals),
            "Name,TargetAmount,SavedSoFar,TargetDate\nLaptop,1500,,2025-06-30\n,100,0,\n",
        )
        .unwrap();
        let goals = store.load_goals().unwrap().rows;
        assert_eq!(goals, vec![GoalRecord::new("Laptop", 1500.0, 0.0, date(2025, 6, 30))]);

        store.save_goals(&goals, None).unwrap();
        assert_eq!(store.load_goals().unwrap().rows, goals);
    }

    #[test]
    fn duplicate_goal_names_collapse_to_last_row() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        fs::write(
            store.table_path(TableKind::Goals),
            "Name,TargetAmount,SavedSoFar,TargetDate\n\
             Laptop,1500,100,2025-06-30\n\
             Trip,900,0,\n\
             Laptop,1800,250,2025-09-30\n",
        )
        .unwrap();
        let goals = store.load_goals().unwrap().rows;
        assert_eq!(
            goals,
            vec![
                GoalRecord::new("Laptop", 1800.0, 250.0, date(2025, 9, 30)),
                GoalRecord::new("Trip", 900.0, 0.0, None),
            ]
        );
    }

    #[test]
    fn stale_revision_is_rejected() {
        let dir = tempdir().unwrap();
        let store = storage(dir.path());
        store.ensure_files().unwrap();
        let first = store.load_goals().unwrap();

        let other_writer = vec![GoalRecord::new("Trip", 900.0, 0.0, None)];
        store.save_goals(&other_writer, Some(first.revision)).unwrap();

        let ours = vec![GoalRecord::new("Car", 5000.0, 0.0, None)];
        let err = store.save_goals(&ours, Some(first.revision)).unwrap_err();
        assert!(matches!(err, PersistenceError::Conflict { table: "goals", .. }));
        assert_eq!(store.load_goals().unwrap().rows, other_writer);

        store.save_goals(&ours, None).unwrap();
        assert_eq!(store.load_goals().unwrap().rows, ours);
    }

    #[test]
    fn backups_are_pruned_to_retention() {
        let dir = tempdir().unwrap();
        let store = CsvStorage::new(Some(dir.path().to_path_buf()), Some(2)).unwrap();
        let mut rows = Vec::new();
        for amount in 1..=6 {
            rows.push(IncomeRecord::new(None, "Salary", amount as f64));
            store.save_incomes(&rows, None).unwrap();
        }
        let backups = store.list_backups(TableKind::Incomes).unwrap();
        assert!(!backups.is_empty());
        assert!(backups.len() <= 2);
        assert!(backups.iter().all(|name| name.starts_with("incomes_")));
    }
}
