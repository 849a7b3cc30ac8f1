//! Confirmation provider abstraction
//!
//! The review workflow asks two kinds of questions: whether the exemplar diff
//! is the one to match against, and what to do with each matching PR. Both go
//! through [`ConfirmationProvider`] so the workflow can be driven by a script
//! in tests and by `dialoguer` in the terminal.

use crate::error::Result;
use crate::types::PullRequestRef;

/// Prompt shown before matching starts
pub const EXEMPLAR_PROMPT: &str = "Continue with this diff?";

/// Prompt shown for each matching PR
pub const REVIEW_PROMPT: &str = "Approve and merge? (y/N/s=stop/a=all)";

/// Answer to the per-PR review prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    /// Approve and merge this PR
    Approve,
    /// Leave this PR alone and move on
    Skip,
    /// Stop processing; remaining PRs are left untouched
    Stop,
    /// Approve and merge this and every remaining PR without asking again
    ApproveAll,
}

impl ReviewChoice {
    /// Interpret a typed answer. Anything unrecognized, including an empty
    /// answer, means skip.
    pub fn parse(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Self::Approve,
            "s" => Self::Stop,
            "a" => Self::ApproveAll,
            _ => Self::Skip,
        }
    }
}

/// Source of answers for the interactive review workflow
pub trait ConfirmationProvider {
    /// Whether to continue with `exemplar`'s diff as the one to match
    fn confirm_exemplar(&mut self, exemplar: &PullRequestRef) -> Result<bool>;

    /// What to do with a matching PR
    fn review_choice(&mut self, pr: &PullRequestRef) -> Result<ReviewChoice>;
}
