use crate::{
    config::{Config, ConfigManager},
    core::{
        years::{current_year, parse_year, year_choices},
        LedgerManager,
    },
    ledger::{to_number_or_zero, Column, LedgerRow, MONTHS},
    render::{self, Grid, MONTH_LABELS},
    storage::{JsonFileStore, KeyValueStore, MemoryStore},
};

use super::{
    args::{Cli, Command},
    io, CommandError,
};

struct Session {
    manager: LedgerManager,
    config: Config,
    color: bool,
    /// The year as the user typed it, shown in headers.
    label: String,
    /// `false` when the year did not parse and the session runs on a scratch store.
    saved: bool,
}

/// Which year a session opens.
#[derive(Debug, Clone, PartialEq, Eq)]
enum YearChoice {
    Year(i32),
    /// Input that is not a year. It gets a fresh blank grid and nothing is persisted.
    Unparsed(String),
}

fn resolve_year(input: Option<&str>) -> YearChoice {
    match input {
        None => YearChoice::Year(current_year()),
        Some(raw) => match parse_year(raw) {
            Some(year) => YearChoice::Year(year),
            None => YearChoice::Unparsed(raw.to_string()),
        },
    }
}

/// Runs one parsed command against the configured file store.
pub fn run(cli: Cli) -> Result<(), CommandError> {
    let config_manager = ConfigManager::new()?;
    let config = config_manager.load()?;
    let color = config.color && !cli.no_color;

    let (store, year, label, saved): (Box<dyn KeyValueStore>, i32, String, bool) =
        match resolve_year(cli.year.as_deref()) {
            YearChoice::Year(year) => {
                let store =
                    JsonFileStore::new(config.resolve_store_dir(config_manager.base_dir()))?;
                (Box::new(store) as Box<dyn KeyValueStore>, year, year.to_string(), true)
            }
            YearChoice::Unparsed(raw) => {
                tracing::warn!(year = %raw, "year is not a number, using an unsaved blank grid");
                (Box::new(MemoryStore::new()) as Box<dyn KeyValueStore>, current_year(), raw, false)
            }
        };
    let manager = LedgerManager::with_config(store, &config, year);
    tracing::debug!(year = %label, saved, "cli session opened");

    let mut session = Session {
        manager,
        config,
        color,
        label,
        saved,
    };
    if !session.saved {
        io::print_warning(
            format!("'{}' is not a year; changes will not be saved", session.label),
            session.color,
        );
    }
    match cli.command.unwrap_or(Command::Show { chart: false }) {
        Command::Show { chart } => show(&session, chart),
        Command::AddRow { desc, values } => add_row(&mut session, desc, &values),
        Command::Set { row, column, value } => set(&mut session, row, &column, &value),
        Command::Move { from, to } => move_row(&mut session, from, to),
        Command::Clear { yes } => clear(&mut session, yes),
        Command::Years => years(&session),
        Command::Tab { name } => tab(&mut session, name),
    }
}

fn show(session: &Session, chart: bool) -> Result<(), CommandError> {
    let manager = &session.manager;
    io::print_info(format!("Year {}", session.label));
    io::print_info(Grid::build(manager.ledger(), manager.snapshot()).render(session.color));
    if chart {
        io::print_info("");
        io::print_info(render::render_chart(manager.snapshot()));
    }
    Ok(())
}

fn add_row(session: &mut Session, desc: String, values: &[String]) -> Result<(), CommandError> {
    if values.len() > MONTHS {
        return Err(CommandError::InvalidArguments(format!(
            "at most {} values can be given, got {}",
            MONTHS,
            values.len()
        )));
    }
    let row = LedgerRow::new(desc, values.iter().map(|value| to_number_or_zero(value)));
    let index = session.manager.add_row(Some(row))?;
    io::print_success(format!("Added row {}", index + 1), session.color);
    show(session, false)
}

fn set(session: &mut Session, row: usize, column: &str, value: &str) -> Result<(), CommandError> {
    let index = row_index(row)?;
    let column = parse_column(column)?;
    session.manager.set_cell(index, column, value)?;
    show(session, false)
}

fn move_row(session: &mut Session, from: usize, to: usize) -> Result<(), CommandError> {
    session.manager.move_row(row_index(from)?, row_index(to)?)?;
    show(session, false)
}

fn clear(session: &mut Session, yes: bool) -> Result<(), CommandError> {
    let year = session.label.clone();
    let confirmed = yes || confirm_clear(&year);
    if session.manager.clear_year(confirmed)? {
        io::print_success(format!("Cleared data for {year}"), session.color);
    } else {
        io::print_warning(format!("Nothing cleared for {year}"), session.color);
    }
    Ok(())
}

/// Asks before deleting. A prompt that cannot be shown (no terminal) counts as a no.
fn confirm_clear(year: &str) -> bool {
    let prompt = format!("Delete all data for {year}? This cannot be undone.");
    match io::confirm_action(&prompt, false) {
        Ok(answer) => answer,
        Err(err) => {
            tracing::warn!(error = %err, "confirmation unavailable, nothing will be cleared");
            false
        }
    }
}

fn years(session: &Session) -> Result<(), CommandError> {
    let active = session.saved.then(|| session.manager.year());
    for year in year_choices(current_year(), session.config.year_window) {
        let marker = if Some(year) == active { '*' } else { ' ' };
        io::print_info(format!("{marker} {year}"));
    }
    Ok(())
}

fn tab(session: &mut Session, name: Option<String>) -> Result<(), CommandError> {
    match name {
        Some(name) if name.trim().is_empty() => Err(CommandError::InvalidArguments(
            "tab name cannot be empty".into(),
        )),
        Some(name) => {
            session.manager.select_tab(name.trim())?;
            io::print_success(
                format!("Active tab: {}", session.manager.active_tab()),
                session.color,
            );
            Ok(())
        }
        None => {
            io::print_info(session.manager.active_tab());
            Ok(())
        }
    }
}

/// Converts a row number as typed (starting at 1) into an index.
fn row_index(row: usize) -> Result<usize, CommandError> {
    row.checked_sub(1)
        .ok_or_else(|| CommandError::InvalidArguments("rows are numbered from 1".into()))
}

/// Parses a column argument: `desc`/`description`, a month number `1`-`12`, or a month name
/// or its three-letter abbreviation. Case-insensitive.
pub fn parse_column(input: &str) -> Result<Column, CommandError> {
    let trimmed = input.trim().to_ascii_lowercase();
    if trimmed == "desc" || trimmed == "description" {
        return Ok(Column::Description);
    }
    if let Ok(number) = trimmed.parse::<usize>() {
        return match number {
            1..=MONTHS => Ok(Column::Month(number - 1)),
            _ => Err(CommandError::InvalidArguments(format!(
                "month must be between 1 and {MONTHS}, got {number}"
            ))),
        };
    }
    MONTH_NAMES
        .iter()
        .position(|name| *name == trimmed)
        .or_else(|| {
            MONTH_LABELS
                .iter()
                .position(|label| label.to_ascii_lowercase() == trimmed)
        })
        .map(Column::Month)
        .ok_or_else(|| CommandError::InvalidArguments(format!("unknown column '{input}'")))
}

const MONTH_NAMES: [&str; MONTHS] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];
