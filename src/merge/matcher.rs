//! Diff matching against the exemplar

use crate::diff::DiffText;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::progress::ProgressCallback;
use crate::types::PullRequestRef;
use tracing::debug;

/// Whether a candidate diff is the same change as the exemplar diff
pub fn diffs_match(exemplar: &DiffText, candidate: &DiffText) -> bool {
    exemplar.same_change_as(candidate)
}

/// Keep the candidates whose diff equals the exemplar diff.
///
/// Diffs are fetched one at a time in candidate order. The first failure
/// aborts the pass: a PR whose diff cannot be read is never silently dropped.
pub async fn find_matching(
    candidates: &[PullRequestRef],
    exemplar_diff: &DiffText,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
) -> Result<Vec<PullRequestRef>> {
    progress.on_matching_started(candidates.len()).await;

    let mut matches = Vec::new();
    for pr in candidates {
        let diff = platform.get_diff(pr).await?;
        let matched = diffs_match(exemplar_diff, &diff);
        debug!(pr = %pr, matched, "compared diff");
        progress.on_candidate_checked(pr, matched).await;

        if matched {
            matches.push(pr.clone());
        }
    }

    debug!(
        candidates = candidates.len(),
        matches = matches.len(),
        "matching complete"
    );
    Ok(matches)
}
