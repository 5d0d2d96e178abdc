//! Command-line front-end

pub mod commands;
pub mod ui;

use console::style;

use crate::types::KeyweaveError;

/// Line printed for a failed command. Input problems show the bare message;
/// every other failure gets the red `Error:` prefix.
pub fn error_line(err: &anyhow::Error) -> String {
    match err.downcast_ref::<KeyweaveError>() {
        Some(e) if e.is_user_error() => style(e.to_string()).yellow().to_string(),
        _ => format!("{} {}", style("Error:").red(), err),
    }
}
