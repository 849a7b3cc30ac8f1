//! Progress reporting for the review workflow
//!
//! The workflow never prints; it reports what happens through
//! [`ProgressCallback`] and the CLI decides how to render it.

use crate::diff::DiffText;
use crate::merge::PrOutcome;
use crate::types::PullRequestRef;
use async_trait::async_trait;

/// Receives workflow events as they happen
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// The exemplar diff has been fetched and is about to be confirmed
    async fn on_exemplar_diff(&self, exemplar: &PullRequestRef, diff: &DiffText);

    /// Diff comparison is starting over `candidates` PRs
    async fn on_matching_started(&self, candidates: usize);

    /// One candidate's diff has been compared
    async fn on_candidate_checked(&self, pr: &PullRequestRef, matched: bool);

    /// Matching finished; `matches` may be empty
    async fn on_matches(&self, matches: &[PullRequestRef]);

    /// A matching PR is up for review
    async fn on_pr_started(&self, pr: &PullRequestRef);

    /// A matching PR has been dealt with
    async fn on_pr_outcome(&self, pr: &PullRequestRef, outcome: &PrOutcome);

    /// Free-form notice
    async fn on_message(&self, message: &str);
}

/// Progress callback that ignores everything
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_exemplar_diff(&self, _exemplar: &PullRequestRef, _diff: &DiffText) {}
    async fn on_matching_started(&self, _candidates: usize) {}
    async fn on_candidate_checked(&self, _pr: &PullRequestRef, _matched: bool) {}
    async fn on_matches(&self, _matches: &[PullRequestRef]) {}
    async fn on_pr_started(&self, _pr: &PullRequestRef) {}
    async fn on_pr_outcome(&self, _pr: &PullRequestRef, _outcome: &PrOutcome) {}
    async fn on_message(&self, _message: &str) {}
}
