//! ANSI styling for text output

use std::io::IsTerminal;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
}

/// Apply color to text if stdout supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{color}{text}{}", Colors::RESET)
    } else {
        text.to_string()
    }
}

pub fn supports_formatting() -> bool {
    !cfg!(test)
        && formatting_enabled(
            |key| std::env::var(key).ok(),
            std::io::stdout().is_terminal(),
        )
}

/// Decide from environment variables and whether stdout is a terminal.
///
/// `NO_COLOR` and `FORCE_COLOR=0` disable, any other `FORCE_COLOR` enables,
/// otherwise a terminal with a non-dumb `TERM` is required.
pub fn formatting_enabled<F>(lookup: F, is_terminal: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("NO_COLOR").is_some() || lookup("FORCE_COLOR").as_deref() == Some("0") {
        return false;
    }
    if lookup("FORCE_COLOR").is_some() {
        return true;
    }
    if !is_terminal {
        return false;
    }

    match lookup("TERM") {
        Some(term) => !term.is_empty() && term != "dumb",
        None => lookup("TERM_PROGRAM").is_some(),
    }
}
