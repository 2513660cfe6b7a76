//! Changelog formatter trait.

use chrono::{DateTime, Utc};
use semver::Version;
use serde::Serialize;
use ticklog_commit::TransformedCommit;

use super::Plugin;

/// Commits sharing a section title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitGroup {
    /// The section title; empty for commits without a type.
    pub title: String,

    /// The commits, in display order.
    pub commits: Vec<TransformedCommit>,
}

/// A note together with the commit it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEntry {
    /// The note group title.
    pub title: String,

    /// The note text.
    pub text: String,

    /// Scope of the owning commit.
    pub scope: Option<String>,

    /// Short hash of the owning commit.
    pub hash: Option<String>,
}

/// Notes sharing a title, e.g. `BREAKING CHANGES`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteGroup {
    /// The note group title.
    pub title: String,

    /// The notes, in display order.
    pub notes: Vec<NoteEntry>,
}

/// A release to be formatted.
#[derive(Debug, Clone, Serialize)]
pub struct Release {
    /// The release version.
    pub version: Version,

    /// The release date.
    pub date: DateTime<Utc>,

    /// Optional release name shown next to the version.
    pub title: Option<String>,

    /// Grouped commits.
    pub commit_groups: Vec<CommitGroup>,

    /// Grouped notes.
    pub note_groups: Vec<NoteGroup>,

    /// The previous version (for comparison links).
    pub previous_version: Option<Version>,

    /// The repository URL (for links).
    pub repository_url: Option<String>,
}

impl Release {
    /// Creates a new release with no commits.
    #[must_use]
    pub fn new(version: Version, date: DateTime<Utc>) -> Self {
        Self {
            version,
            date,
            title: None,
            commit_groups: Vec::new(),
            note_groups: Vec::new(),
            previous_version: None,
            repository_url: None,
        }
    }

    /// Sets the grouped commits and notes.
    #[must_use]
    pub fn with_groups(
        mut self,
        commit_groups: Vec<CommitGroup>,
        note_groups: Vec<NoteGroup>,
    ) -> Self {
        self.commit_groups = commit_groups;
        self.note_groups = note_groups;
        self
    }

    /// Sets the release title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the previous version.
    #[must_use]
    pub fn with_previous_version(mut self, version: Version) -> Self {
        self.previous_version = Some(version);
        self
    }

    /// Sets the repository URL, normalized with
    /// [`normalize_repository_url`](crate::normalize_repository_url).
    #[must_use]
    pub fn with_repository_url(mut self, url: impl AsRef<str>) -> Self {
        self.repository_url = Some(crate::normalize_repository_url(url.as_ref()));
        self
    }

    /// Returns true if the release has neither commits nor notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commit_groups.iter().all(|group| group.commits.is_empty())
            && self.note_groups.iter().all(|group| group.notes.is_empty())
    }
}

/// Configuration for the changelog formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatterConfig {
    /// Include short commit hashes in output.
    pub include_hashes: bool,

    /// Include the formatted issue references after each commit.
    pub include_references: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_hashes: true,
            include_references: true,
        }
    }
}

/// Formats changelog output.
pub trait ChangelogFormatter: Plugin {
    /// Formats a release into a changelog string.
    fn format(&self, release: &Release, config: &FormatterConfig) -> String;

    /// Returns the file extension for the output (e.g., "md").
    fn extension(&self) -> &'static str {
        "md"
    }
}
