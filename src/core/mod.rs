//! Application state and the controllers that mutate it.

pub mod ledger_manager;
pub mod reorder;
pub mod services;
pub mod utils;
pub mod years;

pub use ledger_manager::{LedgerManager, LedgerObserver};
pub use reorder::{DragState, ReorderController, RowBox};
pub use services::SummaryService;
