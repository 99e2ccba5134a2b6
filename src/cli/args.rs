use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "finance_grid_cli", version, about = "Monthly income and expense grid")]
pub struct Cli {
    /// Year to operate on (defaults to the current year). A value that is not a whole number
    /// opens a blank scratch grid that is never saved
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub year: Option<String>,

    /// Disable coloured totals
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the grid with row, month and year totals
    Show {
        /// Also draw the monthly bar chart
        #[arg(long)]
        chart: bool,
    },
    /// Append a row; values fill January onwards
    AddRow {
        #[arg(long, default_value = "")]
        desc: String,
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Edit one cell. COLUMN is `desc`, a month number (1-12) or a month name
    Set {
        row: usize,
        column: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Move row FROM so that it becomes row TO (both numbered from 1)
    Move { from: usize, to: usize },
    /// Delete every stored row for the year
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List the selectable years
    Years,
    /// Show or change the active tab
    Tab { name: Option<String> },
}
