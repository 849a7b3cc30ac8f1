//! The multimerge command: find, match, review, merge

use crate::cli::style::{Stylize, check};
use crate::cli::{CliProgress, TerminalPrompter};
use anstream::println;
use anyhow::Context;
use multimerge::auth::{get_github_auth, test_github_auth};
use multimerge::config::{ConfigOverrides, load_config};
use multimerge::error::Error;
use multimerge::merge::{
    PrOutcome, ReviewOptions, ReviewReport, SessionOutcome, SessionRequest, run_session,
};
use multimerge::platform::GitHubService;
use multimerge::types::PullRequestRef;
use std::path::PathBuf;
use tracing::debug;

/// Options for the multimerge command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Title prefix to search for
    pub title_prefix: String,
    /// Exemplar PR URL
    pub example_pr: String,
    /// Explicit token (falls back to `GITHUB_TOKEN`)
    pub token: Option<String>,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
    /// Command-line config overrides
    pub overrides: ConfigOverrides,
    /// List matches without approving or merging
    pub dry_run: bool,
}

/// Run the multimerge command
///
/// Setup and discovery failures are returned; per-PR failures are reported
/// inline and in the summary.
#[allow(clippy::future_not_send)]
pub async fn run_multimerge(options: RunOptions) -> anyhow::Result<()> {
    // Everything that can be checked locally is checked before the first request
    let auth = get_github_auth(options.token.as_deref())?;
    let exemplar =
        PullRequestRef::from_url(&options.example_pr).context("Invalid exemplar PR URL")?;
    let config = load_config(options.config_path.as_deref(), options.overrides)
        .context("Failed to load configuration")?;
    debug!(api_url = %config.api_url, method = %config.merge_method, "configuration loaded");

    let platform = GitHubService::new(&auth, &config)?;
    let login = test_github_auth(&platform)
        .await
        .context("Failed to verify GitHub token")?;
    println!(
        "{} Authenticated as {} {}",
        check(),
        login.emphasis(),
        format!("(token from {})", auth.source).muted()
    );

    let request = SessionRequest {
        title_prefix: options.title_prefix,
        exemplar,
        options: ReviewOptions {
            merge_method: config.merge_method,
            dry_run: options.dry_run,
        },
    };

    let progress = CliProgress::new();
    let mut prompter = TerminalPrompter;
    let outcome = match run_session(&request, &platform, &mut prompter, &progress).await {
        Ok(outcome) => outcome,
        Err(e) => {
            progress.finish_spinner();
            let context = failure_context(&e);
            return Err(anyhow::Error::new(e).context(context));
        }
    };

    if let SessionOutcome::Reviewed(report) = outcome {
        print_summary(&report, options.dry_run);
    }

    Ok(())
}

/// Headline for an error that ended the session early
fn failure_context(error: &Error) -> &'static str {
    match error {
        Error::Auth(_) => "GitHub rejected the token",
        Error::InvalidReference(_) => "GitHub returned a malformed PR URL",
        e if e.is_transport() => "GitHub request failed",
        _ => "Review session failed",
    }
}

/// Print the end-of-run summary
fn print_summary(report: &ReviewReport, dry_run: bool) {
    println!();

    if dry_run {
        println!(
            "{}",
            format!(
                "Dry run: {} PR(s) would be offered for approve and merge.",
                report.outcomes.len()
            )
            .muted()
        );
        return;
    }

    let failed = report.failed_count();
    let headline = format!(
        "{} merged, {} skipped, {} failed",
        report.merged_count(),
        report.skipped_count(),
        failed
    );
    if failed == 0 {
        println!("{} Done: {headline}", check());
    } else {
        println!("{} Done: {headline}", "⚠".warn());
        for (pr, outcome) in report.failures() {
            if let PrOutcome::Failed { stage, reason } = outcome {
                println!("   {} {pr} ({stage}): {}", "Failed:".warn(), reason.muted());
            }
        }
    }

    if report.stopped {
        println!("{}", "Stopped early; remaining PRs were left untouched.".muted());
    }
}
