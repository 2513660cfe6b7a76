//! Issue extraction from structured references and footer text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use ticklog_commit::Reference;

/// Issue tracker keys such as `ABC-123`.
static TRACKER_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+-[0-9]+").expect("invalid regex"));

/// Returns every tracker key in the footer, in order, duplicates included.
#[must_use]
pub fn footer_issues(footer: &str) -> Vec<&str> {
    TRACKER_KEY_RE
        .find_iter(footer)
        .map(|m| m.as_str())
        .collect()
}

/// Collects the issues of a commit.
///
/// Structured references come first, then tracker keys found in the footer.
/// A leading `#` is stripped, candidates that are empty are dropped, and
/// only the first occurrence of each issue is kept.
#[must_use]
pub fn extract_issues(references: &[Reference], footer: Option<&str>) -> Vec<String> {
    let from_references = references.iter().map(|r| r.issue.as_deref());
    let from_footer = footer
        .map(footer_issues)
        .unwrap_or_default()
        .into_iter()
        .map(Some);

    let mut seen = HashSet::new();
    from_references
        .chain(from_footer)
        .flatten()
        // Only a leading `#` is a prefix; `A#1` is kept whole.
        .map(|issue| issue.strip_prefix('#').unwrap_or(issue))
        .filter(|issue| !issue.is_empty())
        .filter(|issue| seen.insert(*issue))
        .map(str::to_string)
        .collect()
}
