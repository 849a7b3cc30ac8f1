//! PR URL decomposition

use crate::error::{Error, Result};
use crate::types::PrLocator;
use url::Url;

/// Decompose a PR web URL into owner, repo and number.
///
/// Accepts `https://<host>/<owner>/<repo>/pull/<number>` on any host, with
/// optional extra leading path segments, trailing slashes, query or fragment.
/// Owner, repo and number are read from the end of the path.
pub fn parse_pr_url(url: &str) -> Result<PrLocator> {
    let invalid = || {
        Error::InvalidReference(format!(
            "expected https://<host>/<owner>/<repo>/pull/<number>, got '{url}'"
        ))
    };

    let parsed = Url::parse(url.trim()).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "https" | "http") {
        return Err(invalid());
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }

    let segments: Vec<&str> = parsed.path_segments().ok_or_else(invalid)?.collect();
    let end = segments
        .iter()
        .rposition(|s| !s.is_empty())
        .map_or(0, |i| i + 1);

    let [.., owner, repo, pull, number] = &segments[..end] else {
        return Err(invalid());
    };

    if *pull != "pull" || owner.is_empty() || repo.is_empty() {
        return Err(invalid());
    }

    let number = number
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(invalid)?;

    Ok(PrLocator {
        owner: (*owner).to_string(),
        repo: (*repo).to_string(),
        number,
    })
}
