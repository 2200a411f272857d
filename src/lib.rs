#![doc(test(attr(deny(warnings))))]

//! SmartSpend computes the figures behind a personal finance dashboard:
//! aggregate totals, the 0-100 SmartScore, and savings-to-goal allocation,
//! over expense, income, investment, and goal tables kept as flat CSV files.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::{Dashboard, FinanceData};
pub use errors::SmartSpendError;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("SmartSpend tracing initialized.");
    });
}
