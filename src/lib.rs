#![doc(test(attr(deny(warnings))))]

//! Finance Grid keeps a spreadsheet-like ledger of monthly income and expense lines per year,
//! with row, month and year totals, drag reordering and key-value persistence.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod render;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::{LedgerManager, LedgerObserver};
pub use errors::{LedgerError, Result};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Finance Grid tracing initialized.");
    });
}
