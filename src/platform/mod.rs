//! Platform service for GitHub
//!
//! Wraps the handful of REST calls the workflow needs behind a trait so the
//! matching and review logic can run against a mock.

mod detection;
mod github;

pub use detection::parse_pr_url;
pub use github::{GitHubService, SEARCH_QUERY};

use crate::diff::DiffText;
use crate::error::Result;
use crate::types::{MergeMethod, MergeResult, PullRequestRef};
use async_trait::async_trait;

/// Platform service trait for the PR operations used by multimerge
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Login of the user the credential belongs to
    async fn current_user(&self) -> Result<String>;

    /// Open PRs assigned to the authenticated user whose title starts with
    /// `title_prefix` (exact, case-sensitive), in search result order
    async fn search_assigned_open_prs(&self, title_prefix: &str) -> Result<Vec<PullRequestRef>>;

    /// Raw diff of a PR
    async fn get_diff(&self, pr: &PullRequestRef) -> Result<DiffText>;

    /// Post an approving review on a PR
    async fn approve(&self, pr: &PullRequestRef) -> Result<()>;

    /// Merge a PR with the specified method
    async fn merge(&self, pr: &PullRequestRef, method: MergeMethod) -> Result<MergeResult>;
}

/// Keep only PRs whose title starts with `prefix`, preserving order
pub fn filter_by_title_prefix(prs: Vec<PullRequestRef>, prefix: &str) -> Vec<PullRequestRef> {
    prs.into_iter()
        .filter(|pr| pr.title().starts_with(prefix))
        .collect()
}
