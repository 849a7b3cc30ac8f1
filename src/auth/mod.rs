//! Authentication for GitHub
//!
//! Supports an explicit `--token` flag and the `GITHUB_TOKEN` environment
//! variable.

mod github;

pub use github::{GITHUB_TOKEN_ENV, GitHubAuthConfig, get_github_auth, resolve_github_auth, test_github_auth};

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token passed on the command line
    Flag,
    /// Token from environment variable
    EnvVar,
}

impl std::fmt::Display for AuthSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "--token"),
            Self::EnvVar => write!(f, "${GITHUB_TOKEN_ENV}"),
        }
    }
}
