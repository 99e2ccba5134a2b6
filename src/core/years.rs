use std::ops::RangeInclusive;

use chrono::{Datelike, Local};

pub const DEFAULT_YEAR_WINDOW: u32 = 5;

/// Calendar year on the local clock.
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Years offered by the year selector: `current - window ..= current + window`.
///
/// This only limits what is offered. Loading and saving accept any year.
pub fn year_choices(current: i32, window: u32) -> RangeInclusive<i32> {
    let window = i32::try_from(window).unwrap_or(i32::MAX);
    current.saturating_sub(window)..=current.saturating_add(window)
}

/// Reads a year typed by a user. Anything that is not an integer is `None`.
pub fn parse_year(input: &str) -> Option<i32> {
    input.trim().parse().ok()
}
