use serde_json::Value;

use crate::{
    errors::{LedgerError, Result},
    storage::{read_json, KeyValueStore, StorageKeys},
};

use super::{
    coerce::{finite_or_zero, to_number_or_zero},
    row::{Column, LedgerRow, MONTHS},
};

/// One year's rows, in display order.
///
/// Always holds at least one row and every row holds exactly twelve finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    year: i32,
    rows: Vec<LedgerRow>,
}

impl Ledger {
    /// A fresh year: a single blank row.
    pub fn new(year: i32) -> Self {
        Self {
            year,
            rows: vec![LedgerRow::blank()],
        }
    }

    /// Wraps existing rows, seeding a blank row when the list is empty.
    pub fn with_rows(year: i32, rows: Vec<LedgerRow>) -> Self {
        if rows.is_empty() {
            Self::new(year)
        } else {
            Self { year, rows }
        }
    }

    /// Rebuilds a ledger from a persisted blob. Anything but a JSON array is an empty year.
    pub fn from_json(year: i32, value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                Self::with_rows(year, items.iter().map(LedgerRow::from_json).collect())
            }
            Value::Null => Self::new(year),
            other => {
                tracing::warn!(year, kind = json_kind(other), "ledger blob is not a list");
                Self::new(year)
            }
        }
    }

    /// Loads `year` from the store. Never fails: unreadable or malformed data is an empty year.
    pub fn load(store: &dyn KeyValueStore, keys: &StorageKeys, year: i32) -> Self {
        let key = keys.year_key(year);
        let ledger = match read_json(store, &key) {
            Some(value) => Self::from_json(year, &value),
            None => Self::new(year),
        };
        tracing::debug!(year, rows = ledger.rows.len(), "ledger loaded");
        ledger
    }

    /// The persisted form: `[{"desc": .., "values": [..12]}, ..]` in row order.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.rows)?)
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.rows)?)
    }

    pub fn persist(&self, store: &dyn KeyValueStore, keys: &StorageKeys) -> Result<()> {
        let key = keys.year_key(self.year);
        store.set(&key, &self.serialize()?)?;
        tracing::debug!(year = self.year, rows = self.rows.len(), "ledger persisted");
        Ok(())
    }

    /// Deletes the stored data for `year` only.
    pub fn clear(store: &dyn KeyValueStore, keys: &StorageKeys, year: i32) -> Result<()> {
        store.remove(&keys.year_key(year))?;
        tracing::info!(year, "ledger data cleared");
        Ok(())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&LedgerRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row (blank unless `initial` is given) and returns its index.
    pub fn add_row(&mut self, initial: Option<LedgerRow>) -> usize {
        self.rows.push(initial.unwrap_or_default());
        self.rows.len() - 1
    }

    /// Applies raw cell input. Month columns go through [`to_number_or_zero`].
    pub fn set_cell(&mut self, row: usize, column: Column, input: &str) -> Result<()> {
        match column {
            Column::Description => {
                self.row_mut(row)?.description = input.to_string();
                Ok(())
            }
            Column::Month(month) => self.set_value(row, month, to_number_or_zero(input)),
        }
    }

    pub fn set_value(&mut self, row: usize, month: usize, value: f64) -> Result<()> {
        if month >= MONTHS {
            return Err(LedgerError::InvalidRef(format!(
                "month {month} is outside 0..{MONTHS}"
            )));
        }
        self.row_mut(row)?.values[month] = finite_or_zero(value);
        Ok(())
    }

    /// Moves the row at `from` so that it ends up at index `to`; everything between shifts by
    /// one. Moving a row onto itself changes nothing.
    pub fn move_row(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.rows.len();
        if from >= len || to >= len {
            return Err(LedgerError::InvalidRef(format!(
                "cannot move row {from} to {to} in a ledger of {len} rows"
            )));
        }
        if from != to {
            let row = self.rows.remove(from);
            self.rows.insert(to, row);
        }
        Ok(())
    }

    fn row_mut(&mut self, index: usize) -> Result<&mut LedgerRow> {
        let len = self.rows.len();
        self.rows.get_mut(index).ok_or_else(|| {
            LedgerError::InvalidRef(format!("row {index} does not exist ({len} rows)"))
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
