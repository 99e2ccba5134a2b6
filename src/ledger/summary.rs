use std::fmt;

use serde::Serialize;

use super::row::MONTHS;

/// Display class of a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalSign {
    NonNegative,
    Negative,
}

impl TotalSign {
    pub fn classify(value: f64) -> Self {
        if value >= 0.0 {
            TotalSign::NonNegative
        } else {
            TotalSign::Negative
        }
    }

    /// Style class used by presentation layers.
    pub fn css_class(self) -> &'static str {
        match self {
            TotalSign::NonNegative => "total-positive",
            TotalSign::Negative => "total-negative",
        }
    }
}

impl fmt::Display for TotalSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TotalSign::NonNegative => "non-negative",
            TotalSign::Negative => "negative",
        };
        f.write_str(label)
    }
}

/// Derived totals for one ledger. Never persisted.
///
/// Row totals and the year total carry a sign class; month totals do not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSnapshot {
    pub row_totals: Vec<f64>,
    pub month_totals: [f64; MONTHS],
    pub year_total: f64,
}

impl AggregateSnapshot {
    pub fn empty() -> Self {
        Self {
            row_totals: Vec::new(),
            month_totals: [0.0; MONTHS],
            year_total: 0.0,
        }
    }

    pub fn row_sign(&self, row: usize) -> Option<TotalSign> {
        self.row_totals.get(row).copied().map(TotalSign::classify)
    }

    pub fn row_signs(&self) -> Vec<TotalSign> {
        self.row_totals
            .iter()
            .copied()
            .map(TotalSign::classify)
            .collect()
    }

    pub fn year_sign(&self) -> TotalSign {
        TotalSign::classify(self.year_total)
    }
}

impl Default for AggregateSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
