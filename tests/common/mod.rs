#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use smartspend::{
    config::SettingsManager,
    storage::{CsvStorage, RecordStorage},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates storage and settings backed by a unique directory for each test.
pub fn setup_test_env() -> (CsvStorage, SettingsManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = CsvStorage::new(Some(base.clone()), Some(3)).expect("create csv storage");
    storage.ensure_files().expect("create table files");
    let settings = SettingsManager::with_base_dir(&base).expect("create settings manager");
    (storage, settings)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
