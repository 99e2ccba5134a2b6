mod common;

use common::{memory_manager, YEAR};
use finance_grid::{
    core::SummaryService,
    ledger::{Column, Ledger, LedgerRow, TotalSign, MONTHS},
};

#[test]
fn row_and_month_totals_agree_with_the_year_total() {
    let ledger = Ledger::with_rows(
        YEAR,
        vec![
            LedgerRow::new("Salary", [2500.0; MONTHS]),
            LedgerRow::new("Rent", [-900.0; MONTHS]),
            LedgerRow::new("Car", [0.0, 0.0, -1200.25, 0.0, 0.0, 310.5]),
        ],
    );
    let snapshot = SummaryService::compute(&ledger);
    let by_rows: f64 = snapshot.row_totals.iter().sum();
    let by_months: f64 = snapshot.month_totals.iter().sum();
    assert!((by_rows - snapshot.year_total).abs() < 1e-9);
    assert_eq!(by_months, snapshot.year_total);
    assert_eq!(SummaryService::compute(&ledger), snapshot);
}

#[test]
fn zero_total_counts_as_non_negative() {
    let ledger = Ledger::new(YEAR);
    let snapshot = SummaryService::compute(&ledger);
    assert_eq!(snapshot.row_totals, vec![0.0]);
    assert_eq!(snapshot.year_sign(), TotalSign::NonNegative);
    assert_eq!(TotalSign::classify(-0.01).css_class(), "total-negative");
}

#[test]
fn manager_keeps_totals_in_step_with_edits() {
    let (mut manager, _store) = memory_manager(YEAR);
    manager.set_cell(0, Column::Month(0), "1000").unwrap();
    manager.add_row(None).unwrap();
    manager.set_cell(1, Column::Month(0), "-1250").unwrap();

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.row_totals, vec![1000.0, -1250.0]);
    assert_eq!(snapshot.year_total, -250.0);
    assert_eq!(snapshot.year_sign(), TotalSign::Negative);
    assert_eq!(manager.chart_series()[0], -250.0);
    assert_eq!(manager.chart_series()[1..], [0.0; MONTHS - 1]);
}
