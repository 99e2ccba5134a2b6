use crate::ledger::{AggregateSnapshot, Ledger, MONTHS};

/// Computes row, month and year totals for a ledger.
pub struct SummaryService;

impl SummaryService {
    /// Pure, single pass over `rows x 12`. Sums use plain `f64` addition with no
    /// intermediate rounding; the year total is the sum of the month totals.
    pub fn compute(ledger: &Ledger) -> AggregateSnapshot {
        let mut month_totals = [0.0; MONTHS];
        let mut row_totals = Vec::with_capacity(ledger.len());

        for row in ledger.rows() {
            let mut row_total = 0.0_f64;
            for (month, &value) in row.values.iter().enumerate() {
                month_totals[month] += value;
                row_total += value;
            }
            row_totals.push(row_total);
        }

        let year_total = month_totals.iter().sum();
        AggregateSnapshot {
            row_totals,
            month_totals,
            year_total,
        }
    }

    /// Month totals as the chart consumes them.
    pub fn chart_values(ledger: &Ledger) -> [f64; MONTHS] {
        Self::compute(ledger).month_totals
    }
}
