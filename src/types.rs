//! Core types for multimerge

use crate::error::{Error, Result};
use crate::platform::parse_pr_url;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Owner, repository and number decomposed from a PR web URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrLocator {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// PR number
    pub number: u64,
}

/// A pull request found by search or named on the command line
///
/// Fields are private and the only constructors go through
/// [`parse_pr_url`], so every API call made with a `PullRequestRef` targets a
/// well-formed owner/repo/number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    owner: String,
    repo: String,
    number: u64,
    html_url: String,
    title: String,
}

impl PullRequestRef {
    /// Build a reference from a PR web URL such as
    /// `https://github.com/owner/repo/pull/123`.
    pub fn from_url(url: &str) -> Result<Self> {
        let locator = parse_pr_url(url)?;
        Ok(Self::from_locator(locator, url.trim()))
    }

    /// Build a reference from a locator `parse_pr_url` produced for `html_url`
    pub(crate) fn from_locator(locator: PrLocator, html_url: &str) -> Self {
        Self {
            owner: locator.owner,
            repo: locator.repo,
            number: locator.number,
            html_url: html_url.to_string(),
            title: String::new(),
        }
    }

    /// Same PR, with its title set
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Repository owner
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// PR number
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Web URL for the PR
    pub fn html_url(&self) -> &str {
        &self.html_url
    }

    /// PR title (empty for references parsed from a bare URL)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Short label used in listings: `repo #123`
    pub fn display_name(&self) -> String {
        format!("{} #{}", self.repo, self.number)
    }
}

impl std::fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    /// Squash all commits into one
    #[default]
    Squash,
    /// Create a merge commit
    Merge,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Squash => write!(f, "squash"),
            Self::Merge => write!(f, "merge"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

impl FromStr for MergeMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "squash" => Ok(Self::Squash),
            "merge" => Ok(Self::Merge),
            "rebase" => Ok(Self::Rebase),
            other => Err(Error::Config(format!(
                "unknown merge method '{other}' (expected squash, merge or rebase)"
            ))),
        }
    }
}

/// Result of a merge operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Whether the merge was successful
    pub merged: bool,
    /// The SHA of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge operation (especially on failure)
    pub message: Option<String>,
}
