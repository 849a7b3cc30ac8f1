//! CLI command implementations

mod progress;
mod prompt;
mod run;
pub mod style;

pub use progress::CliProgress;
pub use prompt::TerminalPrompter;
pub use run::{RunOptions, run_multimerge};
