//! Presentation helpers: pure functions from ledger state to text.
//!
//! Amounts are rounded to two decimals here and nowhere else.

use colored::Colorize;

use crate::ledger::{AggregateSnapshot, Ledger, TotalSign, MONTHS};

pub const MONTH_LABELS: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
pub const MONTH_TOTAL_LABEL: &str = "Monthly total";

const COLUMN_GAP: &str = "  ";
const CHART_WIDTH: usize = 40;

/// Formats an amount with two decimals. Zero never renders as `-0.00`.
pub fn format_amount(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value)
}

/// One bar of the monthly chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub label: &'static str,
    pub value: f64,
}

pub fn chart_points(snapshot: &AggregateSnapshot) -> Vec<ChartPoint> {
    MONTH_LABELS
        .iter()
        .zip(snapshot.month_totals.iter())
        .map(|(label, value)| ChartPoint {
            label: *label,
            value: *value,
        })
        .collect()
}

/// Horizontal bar chart of the month totals, scaled to the largest magnitude. Negative months
/// draw with `-`.
pub fn render_chart(snapshot: &AggregateSnapshot) -> String {
    let points = chart_points(snapshot);
    let peak = points
        .iter()
        .map(|point| point.value.abs())
        .fold(0.0_f64, f64::max);
    let amount_width = points
        .iter()
        .map(|point| format_amount(point.value).len())
        .max()
        .unwrap_or(0);

    points
        .iter()
        .map(|point| {
            let length = if peak > 0.0 {
                ((point.value.abs() / peak) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            let glyph = if point.value < 0.0 { "-" } else { "#" };
            format!(
                "{} {:>width$} {}",
                point.label,
                format_amount(point.value),
                glyph.repeat(length),
                width = amount_width
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Left,
    Right,
}

/// A rendered row: plain cells plus the sign class of its total, if it has one.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub cells: Vec<String>,
    pub total_sign: Option<TotalSign>,
}

/// Text form of the ledger grid: header, one line per row, and the month-total footer.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub header: Vec<String>,
    pub body: Vec<GridLine>,
    pub footer: GridLine,
}

impl Grid {
    pub fn build(ledger: &Ledger, snapshot: &AggregateSnapshot) -> Self {
        let mut header = vec!["#".to_string(), "Description".to_string()];
        header.extend(MONTH_LABELS.iter().map(|label| label.to_string()));
        header.push("Total".to_string());

        let body = ledger
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let total = snapshot.row_totals.get(index).copied().unwrap_or(0.0);
                let mut cells = vec![(index + 1).to_string(), row.description.clone()];
                cells.extend(row.values.iter().map(|value| format_amount(*value)));
                cells.push(format_amount(total));
                GridLine {
                    cells,
                    total_sign: Some(TotalSign::classify(total)),
                }
            })
            .collect();

        // Month totals are left unclassified; only the year total carries a sign.
        let mut footer_cells = vec![String::new(), MONTH_TOTAL_LABEL.to_string()];
        footer_cells.extend(snapshot.month_totals.iter().map(|value| format_amount(*value)));
        footer_cells.push(format_amount(snapshot.year_total));
        let footer = GridLine {
            cells: footer_cells,
            total_sign: Some(snapshot.year_sign()),
        };

        Self {
            header,
            body,
            footer,
        }
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|cell| cell.chars().count()).collect();
        for line in self.body.iter().chain(std::iter::once(&self.footer)) {
            for (width, cell) in widths.iter_mut().zip(line.cells.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    /// Renders the grid. With `color`, totals are green when non-negative and red otherwise.
    pub fn render(&self, color: bool) -> String {
        let widths = self.widths();
        let mut lines = Vec::with_capacity(self.body.len() + 3);
        lines.push(render_cells(&self.header, &widths, None, false));
        lines.push(
            widths
                .iter()
                .map(|width| "-".repeat(*width))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP),
        );
        for line in &self.body {
            lines.push(render_cells(&line.cells, &widths, line.total_sign, color));
        }
        lines.push(render_cells(
            &self.footer.cells,
            &widths,
            self.footer.total_sign,
            color,
        ));
        lines.join("\n")
    }
}

fn alignment_for(column: usize) -> Alignment {
    if column == 1 {
        Alignment::Left
    } else {
        Alignment::Right
    }
}

fn render_cells(
    cells: &[String],
    widths: &[usize],
    total_sign: Option<TotalSign>,
    color: bool,
) -> String {
    let last = widths.len().saturating_sub(1);
    widths
        .iter()
        .enumerate()
        .map(|(column, width)| {
            let text = cells.get(column).map(String::as_str).unwrap_or("");
            let padded = match alignment_for(column) {
                Alignment::Left => format!("{:<width$}", text, width = width),
                Alignment::Right => format!("{:>width$}", text, width = width),
            };
            match (column == last && color, total_sign) {
                (true, Some(TotalSign::NonNegative)) => padded.green().to_string(),
                (true, Some(TotalSign::Negative)) => padded.red().to_string(),
                _ => padded,
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}
