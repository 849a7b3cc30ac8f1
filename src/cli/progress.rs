//! Terminal rendering of workflow progress

use crate::cli::style::{Stylize, check, cross, hyperlinks_supported, pr_link, rule, spinner_style};
use anstream::println;
use async_trait::async_trait;
use indicatif::ProgressBar;
use multimerge::diff::{DiffText, colorize_diff};
use multimerge::merge::PrOutcome;
use multimerge::progress::ProgressCallback;
use multimerge::types::PullRequestRef;
use std::sync::Mutex;
use std::time::Duration;

/// Prints workflow events to stdout, with a spinner while diffs are compared
pub struct CliProgress {
    hyperlinks: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl CliProgress {
    /// Create a reporter for the current terminal
    pub fn new() -> Self {
        Self {
            hyperlinks: hyperlinks_supported(),
            spinner: Mutex::new(None),
        }
    }

    fn link(&self, pr: &PullRequestRef) -> String {
        pr_link(pr, self.hyperlinks)
    }

    /// Clear the matching spinner, if one is running
    pub fn finish_spinner(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(spinner) = guard.take()
        {
            spinner.finish_and_clear();
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_exemplar_diff(&self, exemplar: &PullRequestRef, diff: &DiffText) {
        println!("Example PR diff ({}):", self.link(exemplar));
        println!("{}", rule());
        if diff.is_empty() {
            println!("{}", "(empty diff)".muted());
        } else {
            println!("{}", colorize_diff(&diff.to_text()));
        }
        println!("{}", rule());
    }

    async fn on_matching_started(&self, candidates: usize) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.set_message(format!(
            "Searching for matching PRs among {}...",
            format!("{candidates} candidate(s)").accent()
        ));
        spinner.enable_steady_tick(Duration::from_millis(80));

        if let Ok(mut guard) = self.spinner.lock() {
            *guard = Some(spinner);
        }
    }

    async fn on_candidate_checked(&self, pr: &PullRequestRef, matched: bool) {
        if let Ok(guard) = self.spinner.lock()
            && let Some(spinner) = guard.as_ref()
        {
            let verdict = if matched { "match" } else { "different" };
            spinner.set_message(format!("Compared {}: {verdict}", pr.display_name()));
        }
    }

    async fn on_matches(&self, matches: &[PullRequestRef]) {
        self.finish_spinner();
        if matches.is_empty() {
            return;
        }

        println!(
            "Found {} matching PRs:",
            matches.len().to_string().accent()
        );
        for pr in matches {
            println!("  {}", self.link(pr));
        }
    }

    async fn on_pr_started(&self, pr: &PullRequestRef) {
        println!();
        println!("Process {}?", self.link(pr));
    }

    async fn on_pr_outcome(&self, pr: &PullRequestRef, outcome: &PrOutcome) {
        let name = pr.display_name();
        match outcome {
            PrOutcome::Merged { sha } => {
                let sha = sha
                    .as_deref()
                    .map(|s| format!(" ({})", s.muted()))
                    .unwrap_or_default();
                println!("{} Successfully processed {}{sha}", check(), name.emphasis());
            }
            PrOutcome::Skipped => println!("{}", format!("Skipped {name}").muted()),
            PrOutcome::Failed { stage, reason } => {
                println!(
                    "{} Failed to {stage} {}: {}",
                    cross(),
                    name.emphasis(),
                    reason.error()
                );
            }
            PrOutcome::Planned => {
                println!("{}", format!("Would approve and merge {name}").muted());
            }
        }
    }

    async fn on_message(&self, message: &str) {
        self.finish_spinner();
        println!("{message}");
    }
}
