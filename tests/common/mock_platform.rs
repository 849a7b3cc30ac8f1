//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use multimerge::diff::DiffText;
use multimerge::error::{Error, Result};
use multimerge::platform::{PlatformService, filter_by_title_prefix};
use multimerge::types::{MergeMethod, MergeResult, PullRequestRef};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Call record for `merge`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// Hand-written mock of `PlatformService`
///
/// PRs are keyed by number, so tests should keep numbers unique.
///
/// Features:
/// - Search results filtered by title prefix the way GitHub + the client filter do
/// - Per-PR diffs and merge responses
/// - Call tracking for verification
/// - Error injection per call and per PR
pub struct MockPlatformService {
    login: String,
    assigned: Mutex<Vec<PullRequestRef>>,
    diffs: Mutex<HashMap<u64, String>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    // Call tracking
    search_calls: Mutex<Vec<String>>,
    diff_calls: Mutex<Vec<u64>>,
    approve_calls: Mutex<Vec<u64>>,
    merge_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_user: Mutex<Option<String>>,
    error_on_search: Mutex<Option<String>>,
    error_on_diff: Mutex<HashSet<u64>>,
    error_on_approve: Mutex<HashSet<u64>>,
    error_on_merge: Mutex<HashSet<u64>>,
}

fn pull_path(pr: &PullRequestRef) -> String {
    format!("/repos/{}/{}/pulls/{}", pr.owner(), pr.repo(), pr.number())
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatformService {
    /// Create an empty mock authenticated as `octocat`
    pub fn new() -> Self {
        Self {
            login: "octocat".to_string(),
            assigned: Mutex::new(Vec::new()),
            diffs: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            search_calls: Mutex::new(Vec::new()),
            diff_calls: Mutex::new(Vec::new()),
            approve_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            error_on_user: Mutex::new(None),
            error_on_search: Mutex::new(None),
            error_on_diff: Mutex::new(HashSet::new()),
            error_on_approve: Mutex::new(HashSet::new()),
            error_on_merge: Mutex::new(HashSet::new()),
        }
    }

    // === Setup ===

    /// Add an open PR assigned to the user, with its diff
    pub fn add_assigned_pr(&self, pr: &PullRequestRef, diff: &str) {
        self.assigned.lock().unwrap().push(pr.clone());
        self.set_diff(pr.number(), diff);
    }

    /// Set the diff returned for a PR that is not in the search results,
    /// such as an exemplar from another repository
    pub fn set_diff(&self, pr_number: u64, diff: &str) {
        self.diffs
            .lock()
            .unwrap()
            .insert(pr_number, diff.to_string());
    }

    /// Set the response for `merge` for a specific PR
    pub fn set_merge_response(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    // === Error injection ===

    /// Make `current_user` return an auth error
    pub fn fail_current_user(&self, msg: &str) {
        *self.error_on_user.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `search_assigned_open_prs` return an error
    pub fn fail_search(&self, msg: &str) {
        *self.error_on_search.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `get_diff` fail for one PR
    pub fn fail_diff_for(&self, pr_number: u64) {
        self.error_on_diff.lock().unwrap().insert(pr_number);
    }

    /// Make `approve` fail for one PR
    pub fn fail_approve_for(&self, pr_number: u64) {
        self.error_on_approve.lock().unwrap().insert(pr_number);
    }

    /// Make `merge` fail for one PR
    pub fn fail_merge_for(&self, pr_number: u64) {
        self.error_on_merge.lock().unwrap().insert(pr_number);
    }

    // === Call tracking ===

    /// Title prefixes passed to `search_assigned_open_prs`
    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    /// PR numbers whose diff was fetched, in order
    pub fn diff_calls(&self) -> Vec<u64> {
        self.diff_calls.lock().unwrap().clone()
    }

    /// PR numbers that were approved, in order
    pub fn approve_calls(&self) -> Vec<u64> {
        self.approve_calls.lock().unwrap().clone()
    }

    /// Merge calls, in order
    pub fn merge_calls(&self) -> Vec<MergePrCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// PR numbers that were merged, in order
    pub fn merged_numbers(&self) -> Vec<u64> {
        self.merge_calls().iter().map(|c| c.pr_number).collect()
    }

    /// Assert that no approve or merge call was made
    pub fn assert_no_writes(&self) {
        assert!(
            self.approve_calls().is_empty(),
            "unexpected approvals: {:?}",
            self.approve_calls()
        );
        assert!(
            self.merge_calls().is_empty(),
            "unexpected merges: {:?}",
            self.merge_calls()
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn current_user(&self) -> Result<String> {
        if let Some(msg) = self.error_on_user.lock().unwrap().as_ref() {
            return Err(Error::Auth(msg.clone()));
        }
        Ok(self.login.clone())
    }

    async fn search_assigned_open_prs(&self, title_prefix: &str) -> Result<Vec<PullRequestRef>> {
        self.search_calls
            .lock()
            .unwrap()
            .push(title_prefix.to_string());

        if let Some(msg) = self.error_on_search.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        let assigned = self.assigned.lock().unwrap().clone();
        Ok(filter_by_title_prefix(assigned, title_prefix))
    }

    async fn get_diff(&self, pr: &PullRequestRef) -> Result<DiffText> {
        self.diff_calls.lock().unwrap().push(pr.number());

        if self.error_on_diff.lock().unwrap().contains(&pr.number()) {
            return Err(Error::GitHubApi(format!(
                "GET {} failed with 502 Bad Gateway: upstream timeout",
                pull_path(pr)
            )));
        }

        self.diffs
            .lock()
            .unwrap()
            .get(&pr.number())
            .map(|d| DiffText::new(d.as_str()))
            .ok_or_else(|| {
                Error::GitHubApi(format!(
                    "GET {} failed with 404 Not Found: Not Found",
                    pull_path(pr)
                ))
            })
    }

    async fn approve(&self, pr: &PullRequestRef) -> Result<()> {
        self.approve_calls.lock().unwrap().push(pr.number());

        if self.error_on_approve.lock().unwrap().contains(&pr.number()) {
            return Err(Error::GitHubApi(format!(
                "POST {}/reviews failed with 422 Unprocessable Entity: Can not approve your own pull request",
                pull_path(pr)
            )));
        }
        Ok(())
    }

    async fn merge(&self, pr: &PullRequestRef, method: MergeMethod) -> Result<MergeResult> {
        self.merge_calls.lock().unwrap().push(MergePrCall {
            pr_number: pr.number(),
            method,
        });

        if self.error_on_merge.lock().unwrap().contains(&pr.number()) {
            return Err(Error::GitHubApi(format!(
                "PUT {}/merge failed with 405 Method Not Allowed: Pull Request is not mergeable",
                pull_path(pr)
            )));
        }

        let response = self.merge_responses.lock().unwrap().get(&pr.number()).cloned();
        Ok(response.unwrap_or_else(|| MergeResult {
            merged: true,
            sha: Some(format!("sha{}", pr.number())),
            message: Some("Pull Request successfully merged".to_string()),
        }))
    }
}
