//! User settings: display currency, monthly budget, and UI theme.
//!
//! Settings live in a single JSON document next to the data tables and are
//! passed by reference into calculations.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::SettingsManager;
pub use model::{Settings, DEFAULT_THEME};
