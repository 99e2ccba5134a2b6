use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::coerce::{finite_or_zero, value_to_number_or_zero};

/// Number of monthly columns in every row; index 0 is January.
pub const MONTHS: usize = 12;

/// One line item: a label plus a value per calendar month.
///
/// Serialises as `{"desc": ..., "values": [..12]}`. Deserialisation is lenient and never
/// fails; see [`LedgerRow::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerRow {
    #[serde(rename = "desc")]
    pub description: String,
    pub values: [f64; MONTHS],
}

/// Addresses one editable cell within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Description,
    /// Zero-based month index.
    Month(usize),
}

impl LedgerRow {
    /// Builds a row from any number of values: extra entries are dropped, missing ones are
    /// zero, non-finite ones become zero.
    pub fn new(description: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let mut padded = [0.0; MONTHS];
        for (slot, value) in padded.iter_mut().zip(values) {
            *slot = finite_or_zero(value);
        }
        Self {
            description: description.into(),
            values: padded,
        }
    }

    pub fn blank() -> Self {
        Self::new("", std::iter::empty())
    }

    /// Reads a persisted row.
    ///
    /// A non-object yields a blank row. `desc` keeps strings, renders numbers as text and
    /// treats anything else as empty. `values` entries go through the numeric coercion and are
    /// padded or truncated to twelve.
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::blank();
        };
        let description = match fields.get("desc") {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => String::new(),
        };
        let values: Vec<f64> = match fields.get("values") {
            Some(Value::Array(items)) => items.iter().map(value_to_number_or_zero).collect(),
            _ => Vec::new(),
        };
        Self::new(description, values)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn is_blank(&self) -> bool {
        self.description.is_empty() && self.values.iter().all(|value| *value == 0.0)
    }
}

impl Default for LedgerRow {
    fn default() -> Self {
        Self::blank()
    }
}

impl<'de> Deserialize<'de> for LedgerRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}
