use std::fmt;

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};

use super::CommandError;

/// Print an informational message.
pub fn print_info(message: impl fmt::Display) {
    println!("{message}");
}

/// Print a success message, highlighted when colour is enabled.
pub fn print_success(message: impl fmt::Display, color: bool) {
    if color {
        println!("{}", message.to_string().green());
    } else {
        println!("{message}");
    }
}

/// Print a warning to stderr.
pub fn print_warning(message: impl fmt::Display, color: bool) {
    if color {
        eprintln!("{}", message.to_string().yellow());
    } else {
        eprintln!("{message}");
    }
}

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(prompt: &str, default: bool) -> Result<bool, CommandError> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}
