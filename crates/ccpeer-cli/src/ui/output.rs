//! Styled status lines for commands.

use crossterm::style::{Color, Stylize};

const ICON_INFO: &str = "•";
const ICON_SUCCESS: &str = "✓";

/// A cheap handle for printing command results.
///
/// Every line respects `--quiet`. Failures are reported by `main` through
/// the returned error.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Prints an informational message.
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", ICON_INFO.with(Color::DarkGrey));
        }
    }

    /// Prints a success message.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", ICON_SUCCESS.with(Color::Green).bold());
        }
    }

    /// Prints a `key: value` detail line under a previous message.
    pub fn detail(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {:<10} {}", format!("{key}:").dark_grey(), value);
        }
    }
}
