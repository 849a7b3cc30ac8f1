//! GitHub credential resolution

use super::AuthSource;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use tracing::debug;

/// Environment variable consulted when no `--token` is given
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// A resolved GitHub credential
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Bearer token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("token", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

/// Resolve a credential from an explicit token or the process environment
pub fn get_github_auth(explicit: Option<&str>) -> Result<GitHubAuthConfig> {
    resolve_github_auth(explicit, |name| std::env::var(name).ok())
}

/// Resolve a credential with a pluggable environment lookup
///
/// The explicit token wins; blank values count as absent.
pub fn resolve_github_auth(
    explicit: Option<&str>,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> Result<GitHubAuthConfig> {
    if let Some(token) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        debug!(source = %AuthSource::Flag, "using GitHub token");
        return Ok(GitHubAuthConfig {
            token: token.to_string(),
            source: AuthSource::Flag,
        });
    }

    if let Some(token) = lookup_env(GITHUB_TOKEN_ENV)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
    {
        debug!(source = %AuthSource::EnvVar, "using GitHub token");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::EnvVar,
        });
    }

    Err(Error::Auth(format!(
        "GitHub token required. Pass --token or set the {GITHUB_TOKEN_ENV} environment variable."
    )))
}

/// Verify the credential against GitHub, returning the user's login
pub async fn test_github_auth(platform: &dyn PlatformService) -> Result<String> {
    platform.current_user().await
}
