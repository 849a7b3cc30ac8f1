//! Diff text handling: comparison and terminal highlighting

use owo_colors::OwoColorize;
use std::borrow::Cow;

/// Raw unified diff of one pull request, byte for byte as GitHub sent it
///
/// Diffs of non-UTF-8 files are not valid UTF-8, so the bytes are kept and
/// only decoded (lossily) for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffText(Vec<u8>);

impl DiffText {
    /// Wrap raw diff bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// The diff exactly as GitHub returned it
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The diff with leading and trailing ASCII whitespace removed
    pub fn normalized(&self) -> &[u8] {
        self.0.trim_ascii()
    }

    /// Whether two diffs are the same change (byte-equal after trimming)
    pub fn same_change_as(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }

    /// Whether the diff has no content
    pub fn is_empty(&self) -> bool {
        self.normalized().is_empty()
    }

    /// The diff decoded for display; invalid UTF-8 becomes U+FFFD
    pub fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl From<&str> for DiffText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<&[u8]> for DiffText {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl std::fmt::Display for DiffText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Highlight one diff line.
///
/// File headers are bold, hunk headers cyan, additions green, deletions red.
/// Anything else is returned as is.
pub fn colorize_line(line: &str) -> String {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold().to_string()
    } else if line.starts_with("@@") {
        line.cyan().to_string()
    } else if line.starts_with('+') {
        line.green().to_string()
    } else if line.starts_with('-') {
        line.red().to_string()
    } else {
        line.to_string()
    }
}

/// Highlight a whole diff for terminal display
pub fn colorize_diff(diff: &str) -> String {
    diff.split('\n')
        .map(colorize_line)
        .collect::<Vec<_>>()
        .join("\n")
}
