//! Error types for multimerge

use thiserror::Error;

/// Errors that can occur while finding, matching, approving or merging PRs
#[derive(Error, Debug)]
pub enum Error {
    /// Credential missing, empty, or rejected by GitHub
    #[error("authentication error: {0}")]
    Auth(String),

    /// A PR URL that cannot be decomposed into owner/repo/number
    #[error("invalid PR reference: {0}")]
    InvalidReference(String),

    /// GitHub answered with a non-success status
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Network-level failure talking to GitHub
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Config file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Prompt I/O and other unexpected failures
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error came from talking to the remote API
    ///
    /// Transport errors are fatal during discovery but are captured per PR
    /// during the review loop.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::GitHubApi(_) | Self::Http(_))
    }
}

/// Result type alias for multimerge operations
pub type Result<T> = std::result::Result<T, Error>;
