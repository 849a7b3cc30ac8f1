//! Terminal styling helpers

use indicatif::ProgressStyle;
use multimerge::types::PullRequestRef;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Success mark
pub const CHECK: &str = "✓";

/// Failure mark
pub const CROSS: &str = "✗";

/// Width of the rules drawn around the exemplar diff
pub const RULE_WIDTH: usize = 60;

/// Semantic styles used across CLI output
pub trait Stylize {
    /// Secondary information
    fn muted(&self) -> String;
    /// Names the user should notice
    fn emphasis(&self) -> String;
    /// Counts and identifiers
    fn accent(&self) -> String;
    /// Things that went well
    fn success(&self) -> String;
    /// Things that need attention
    fn warn(&self) -> String;
    /// Things that failed
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    fn error(&self) -> String {
        self.red().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross mark
pub fn cross() -> String {
    CROSS.error()
}

/// Horizontal rule
pub fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Spinner style shared by long-running steps
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Whether stdout understands OSC 8 hyperlinks
pub fn hyperlinks_supported() -> bool {
    supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout)
}

/// `repo #123`, as a clickable link when the terminal supports it and with
/// the URL spelled out otherwise
pub fn pr_link(pr: &PullRequestRef, hyperlinks: bool) -> String {
    let label = pr.display_name();
    if hyperlinks {
        terminal_link::Link::new(&label, pr.html_url()).to_string()
    } else {
        format!("{label} ({})", pr.html_url().muted())
    }
}
