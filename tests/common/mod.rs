//! Shared test helpers

#![allow(dead_code)]

pub mod mock_platform;
pub mod scripted;

pub use mock_platform::{MergePrCall, MockPlatformService};
pub use scripted::{RecordingProgress, ScriptedPrompter};

use multimerge::types::PullRequestRef;

/// Build a PR reference on `test/repo` with the given number and title
pub fn make_pr(number: u64, title: &str) -> PullRequestRef {
    make_pr_in("repo", number, title)
}

/// Build a PR reference on `test/<repo>` with the given number and title
pub fn make_pr_in(repo: &str, number: u64, title: &str) -> PullRequestRef {
    let url = format!("https://github.com/test/{repo}/pull/{number}");
    PullRequestRef::from_url(&url)
        .expect("valid test URL")
        .with_title(title)
}

/// Numbers of a list of PRs, for compact assertions
pub fn numbers(prs: &[PullRequestRef]) -> Vec<u64> {
    prs.iter().map(|pr| pr.number()).collect()
}
