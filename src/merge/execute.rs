//! Review loop and per-PR execution
//!
//! Approve/merge failures are captured as [`PrOutcome::Failed`] and recorded
//! in the [`ReviewReport`]; one bad PR never stops the batch.

use crate::error::Result;
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::prompt::{ConfirmationProvider, ReviewChoice};
use crate::types::{MergeMethod, PullRequestRef};
use tracing::debug;

/// Which half of approve-then-merge failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    /// Posting the approving review
    Approve,
    /// Merging
    Merge,
}

impl std::fmt::Display for FailedStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Merge => write!(f, "merge"),
        }
    }
}

/// What happened to one matching PR
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrOutcome {
    /// Approved and merged
    Merged {
        /// Merge commit SHA, if GitHub returned one
        sha: Option<String>,
    },
    /// The user chose not to process it
    Skipped,
    /// Approve or merge failed
    Failed {
        /// The step that failed
        stage: FailedStage,
        /// Human-readable reason
        reason: String,
    },
    /// Dry run: would have been offered for approve and merge
    Planned,
}

impl PrOutcome {
    /// Whether the PR ended up merged
    pub const fn is_merged(&self) -> bool {
        matches!(self, Self::Merged { .. })
    }

    /// Whether approve or merge failed
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Options for the review loop
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewOptions {
    /// Merge method for every merge
    pub merge_method: MergeMethod,
    /// List matches without prompting, approving or merging
    pub dry_run: bool,
}

/// Per-run report of the review loop
#[derive(Debug, Clone, Default)]
pub struct ReviewReport {
    /// Outcome of every PR that was reached, in review order
    pub outcomes: Vec<(PullRequestRef, PrOutcome)>,
    /// Whether the user stopped before the end of the list
    pub stopped: bool,
}

impl ReviewReport {
    fn count(&self, pred: impl Fn(&PrOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }

    /// Number of PRs merged
    pub fn merged_count(&self) -> usize {
        self.count(PrOutcome::is_merged)
    }

    /// Number of PRs skipped by the user
    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, PrOutcome::Skipped))
    }

    /// Number of PRs where approve or merge failed
    pub fn failed_count(&self) -> usize {
        self.count(PrOutcome::is_failure)
    }

    /// Failed PRs with their outcome
    pub fn failures(&self) -> impl Iterator<Item = &(PullRequestRef, PrOutcome)> {
        self.outcomes.iter().filter(|(_, o)| o.is_failure())
    }

    /// Outcome recorded for a PR, if it was reached
    pub fn outcome_for(&self, pr: &PullRequestRef) -> Option<&PrOutcome> {
        self.outcomes
            .iter()
            .find(|(p, _)| p == pr)
            .map(|(_, outcome)| outcome)
    }
}

/// Approve a PR, then merge it (EFFECTFUL)
///
/// Never returns an error: failures come back as [`PrOutcome::Failed`]. A
/// failed approval skips the merge.
pub async fn approve_and_merge(
    pr: &PullRequestRef,
    platform: &dyn PlatformService,
    method: MergeMethod,
    progress: &dyn ProgressCallback,
) -> PrOutcome {
    progress
        .on_message(&format!("Approving {}...", pr.display_name()))
        .await;
    if let Err(e) = platform.approve(pr).await {
        debug!(pr = %pr, error = %e, "approve failed");
        return PrOutcome::Failed {
            stage: FailedStage::Approve,
            reason: e.to_string(),
        };
    }

    progress
        .on_message(&format!("Merging {}...", pr.display_name()))
        .await;
    match platform.merge(pr, method).await {
        Ok(result) if result.merged => PrOutcome::Merged { sha: result.sha },
        Ok(result) => PrOutcome::Failed {
            stage: FailedStage::Merge,
            reason: result
                .message
                .unwrap_or_else(|| "GitHub did not merge the PR".to_string()),
        },
        Err(e) => {
            debug!(pr = %pr, error = %e, "merge failed");
            PrOutcome::Failed {
                stage: FailedStage::Merge,
                reason: e.to_string(),
            }
        }
    }
}

/// Walk through the matches, asking what to do with each (EFFECTFUL)
///
/// Answering stop leaves the current and remaining PRs without an outcome.
/// Answering approve-all processes the current PR and every later one
/// without asking again. Only prompt failures are returned as errors.
#[allow(clippy::future_not_send)]
pub async fn execute_review(
    matches: &[PullRequestRef],
    platform: &dyn PlatformService,
    prompter: &mut dyn ConfirmationProvider,
    progress: &dyn ProgressCallback,
    options: ReviewOptions,
) -> Result<ReviewReport> {
    let mut report = ReviewReport::default();
    let mut approve_all = false;

    for pr in matches {
        progress.on_pr_started(pr).await;

        if options.dry_run {
            report.outcomes.push((pr.clone(), PrOutcome::Planned));
            progress.on_pr_outcome(pr, &PrOutcome::Planned).await;
            continue;
        }

        if !approve_all {
            match prompter.review_choice(pr)? {
                ReviewChoice::Stop => {
                    debug!(pr = %pr, "review stopped");
                    progress.on_message("Stopped processing.").await;
                    report.stopped = true;
                    break;
                }
                ReviewChoice::ApproveAll => {
                    approve_all = true;
                    progress
                        .on_message("Auto-approving all remaining PRs...")
                        .await;
                }
                ReviewChoice::Skip => {
                    report.outcomes.push((pr.clone(), PrOutcome::Skipped));
                    progress.on_pr_outcome(pr, &PrOutcome::Skipped).await;
                    continue;
                }
                ReviewChoice::Approve => {}
            }
        }

        let outcome = approve_and_merge(pr, platform, options.merge_method, progress).await;
        debug!(pr = %pr, ?outcome, "processed PR");
        progress.on_pr_outcome(pr, &outcome).await;
        report.outcomes.push((pr.clone(), outcome));
    }

    Ok(report)
}
