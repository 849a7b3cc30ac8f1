//! End-to-end review session
//!
//! Search, confirm the exemplar, match, then review. Errors before the review
//! loop are returned to the caller; per-PR failures inside it are not.

use crate::error::Result;
use crate::merge::execute::{ReviewOptions, ReviewReport, execute_review};
use crate::merge::matcher::find_matching;
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::prompt::ConfirmationProvider;
use crate::types::PullRequestRef;
use tracing::debug;

/// Everything a session needs to know up front
#[derive(Debug, Clone)]
pub struct SessionRequest {
    /// Only PRs whose title starts with this are considered
    pub title_prefix: String,
    /// PR whose diff the others must equal
    pub exemplar: PullRequestRef,
    /// Review loop options
    pub options: ReviewOptions,
}

/// How a session ended
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    /// Search found no PRs with the title prefix
    NoCandidates,
    /// The user rejected the exemplar diff
    Aborted,
    /// No candidate's diff equals the exemplar's
    NoMatches,
    /// The review loop ran
    Reviewed(ReviewReport),
}

/// Run a full session (EFFECTFUL)
#[allow(clippy::future_not_send)]
pub async fn run_session(
    request: &SessionRequest,
    platform: &dyn PlatformService,
    prompter: &mut dyn ConfirmationProvider,
    progress: &dyn ProgressCallback,
) -> Result<SessionOutcome> {
    let candidates = platform
        .search_assigned_open_prs(&request.title_prefix)
        .await?;
    debug!(count = candidates.len(), "found candidates");

    if candidates.is_empty() {
        progress
            .on_message(&format!(
                "No PRs assigned to you with title starting with '{}'",
                request.title_prefix
            ))
            .await;
        return Ok(SessionOutcome::NoCandidates);
    }

    let exemplar_diff = platform.get_diff(&request.exemplar).await?;
    progress
        .on_exemplar_diff(&request.exemplar, &exemplar_diff)
        .await;

    if !prompter.confirm_exemplar(&request.exemplar)? {
        progress.on_message("Aborted.").await;
        return Ok(SessionOutcome::Aborted);
    }

    let matches = find_matching(&candidates, &exemplar_diff, platform, progress).await?;
    progress.on_matches(&matches).await;

    if matches.is_empty() {
        progress.on_message("No PRs with matching diff found").await;
        return Ok(SessionOutcome::NoMatches);
    }

    let report = execute_review(&matches, platform, prompter, progress, request.options).await?;
    Ok(SessionOutcome::Reviewed(report))
}
