//! Year-partitioned ledger model and its persisted JSON shape.

pub mod coerce;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod row;
pub mod summary;

pub use coerce::{to_number_or_zero, value_to_number_or_zero};
pub use ledger::Ledger;
pub use row::{Column, LedgerRow, MONTHS};
pub use summary::{AggregateSnapshot, TotalSign};
