use dirs::home_dir;
use std::{env, path::PathBuf};

pub const HOME_ENV: &str = "SMARTSPEND_HOME";
const DEFAULT_DIR_NAME: &str = ".smartspend";
const BACKUP_DIR: &str = "backups";

/// Returns the application data directory, defaulting to `~/.smartspend`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding per-table backup folders below `base`.
pub fn backups_root_in(base: &std::path::Path) -> PathBuf {
    base.join(BACKUP_DIR)
}
