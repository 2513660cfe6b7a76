//! Issue reference formatting.

/// Renders an issue as a Markdown link when a tracker URL is known, or as
/// `#issue` otherwise.
///
/// The link target is the raw concatenation `{issue_url}/{issue}`; nothing
/// is escaped. An empty URL counts as absent.
#[must_use]
pub fn format_issue(issue_url: Option<&str>, issue: &str) -> String {
    match issue_url.filter(|url| !url.is_empty()) {
        Some(url) => format!("[#{issue}]({url}/{issue})"),
        None => format!("#{issue}"),
    }
}

/// Formats issues against a fixed tracker URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueFormatter<'a> {
    issue_url: Option<&'a str>,
}

impl<'a> IssueFormatter<'a> {
    /// Creates a formatter for the given tracker URL.
    #[must_use]
    pub fn new(issue_url: Option<&'a str>) -> Self {
        Self { issue_url }
    }

    /// Formats a single issue.
    #[must_use]
    pub fn format(&self, issue: &str) -> String {
        format_issue(self.issue_url, issue)
    }

    /// Formats every issue and joins them with `", "`.
    #[must_use]
    pub fn join<S: AsRef<str>>(&self, issues: &[S]) -> String {
        issues
            .iter()
            .map(|issue| self.format(issue.as_ref()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
