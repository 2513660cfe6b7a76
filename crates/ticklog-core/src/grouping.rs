//! Grouping and ordering of transformed commits.

use std::cmp::Ordering;

use ticklog_commit::TransformedCommit;
use ticklog_plugin::{CommitGroup, NoteEntry, NoteGroup};

/// A commit field usable as a group key or sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitField {
    /// The section title (or unclassified type).
    Type,
    /// The scope.
    Scope,
    /// The subject.
    Subject,
    /// The short hash.
    Hash,
    /// The full header.
    Header,
}

impl CommitField {
    fn value(self, commit: &TransformedCommit) -> Option<&str> {
        match self {
            Self::Type => commit.r#type.as_deref(),
            Self::Scope => commit.scope.as_deref(),
            Self::Subject => commit.subject.as_deref(),
            Self::Hash => commit.hash.as_deref(),
            Self::Header => commit.header.as_deref(),
        }
    }
}

/// A note field usable as a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    /// The note title.
    Title,
    /// The note text.
    Text,
    /// Scope of the owning commit.
    Scope,
    /// Short hash of the owning commit.
    Hash,
}

impl NoteField {
    fn value(self, note: &NoteEntry) -> Option<&str> {
        match self {
            Self::Title => Some(&note.title),
            Self::Text => Some(&note.text),
            Self::Scope => note.scope.as_deref(),
            Self::Hash => note.hash.as_deref(),
        }
    }
}

/// How groups are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrder {
    /// Alphabetically by title.
    Title,
    /// In order of first appearance.
    Appearance,
}

/// Declarative grouping and sorting of transformed commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingPolicy {
    /// Field whose value names the commit group.
    pub group_by: CommitField,
    /// Order of commit groups.
    pub commit_groups_sort: GroupOrder,
    /// Sort keys for commits within a group, most significant first.
    pub commits_sort: Vec<CommitField>,
    /// Order of note groups.
    pub note_groups_sort: GroupOrder,
    /// Sort keys for notes within a group, most significant first.
    pub notes_sort: Vec<NoteField>,
}

impl Default for GroupingPolicy {
    fn default() -> Self {
        Self {
            group_by: CommitField::Type,
            commit_groups_sort: GroupOrder::Title,
            commits_sort: vec![CommitField::Scope, CommitField::Subject],
            note_groups_sort: GroupOrder::Title,
            notes_sort: vec![NoteField::Text],
        }
    }
}

impl GroupingPolicy {
    /// Groups commits into sections and collects their notes.
    ///
    /// Commits without a value for `group_by` land in the group with the
    /// empty title. Absent values sort before present ones and all sorts
    /// are stable.
    #[must_use]
    pub fn group(&self, commits: Vec<TransformedCommit>) -> (Vec<CommitGroup>, Vec<NoteGroup>) {
        let mut note_groups: Vec<NoteGroup> = Vec::new();
        for commit in &commits {
            for note in &commit.notes {
                let entry = NoteEntry {
                    title: note.title.clone(),
                    text: note.text.clone(),
                    scope: commit.scope.clone(),
                    hash: commit.hash.clone(),
                };
                match note_groups.iter_mut().find(|g| g.title == note.title) {
                    Some(group) => group.notes.push(entry),
                    None => note_groups.push(NoteGroup {
                        title: note.title.clone(),
                        notes: vec![entry],
                    }),
                }
            }
        }

        let mut commit_groups: Vec<CommitGroup> = Vec::new();
        for commit in commits {
            let title = self.group_by.value(&commit).unwrap_or_default();
            match commit_groups.iter_mut().find(|g| g.title == title) {
                Some(group) => group.commits.push(commit),
                None => commit_groups.push(CommitGroup {
                    title: title.to_string(),
                    commits: vec![commit],
                }),
            }
        }

        for group in &mut commit_groups {
            group
                .commits
                .sort_by(|a, b| compare_by(&self.commits_sort, a, b, CommitField::value));
        }
        if self.commit_groups_sort == GroupOrder::Title {
            commit_groups.sort_by(|a, b| a.title.cmp(&b.title));
        }

        for group in &mut note_groups {
            group
                .notes
                .sort_by(|a, b| compare_by(&self.notes_sort, a, b, NoteField::value));
        }
        if self.note_groups_sort == GroupOrder::Title {
            note_groups.sort_by(|a, b| a.title.cmp(&b.title));
        }

        (commit_groups, note_groups)
    }
}

fn compare_by<F: Copy, T>(
    fields: &[F],
    a: &T,
    b: &T,
    value: impl Fn(F, &T) -> Option<&str>,
) -> Ordering {
    fields
        .iter()
        .map(|&field| value(field, a).cmp(&value(field, b)))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticklog_commit::{Note, ParsedCommit};

    fn make_commit(
        commit_type: Option<&str>,
        scope: Option<&str>,
        subject: &str,
    ) -> TransformedCommit {
        let mut builder = ParsedCommit::builder().subject(subject).hash("abc1234");
        if let Some(t) = commit_type {
            builder = builder.r#type(t);
        }
        if let Some(s) = scope {
            builder = builder.scope(s);
        }
        TransformedCommit::from_parsed(builder.build())
    }

    fn subjects(group: &CommitGroup) -> Vec<&str> {
        group
            .commits
            .iter()
            .map(|c| c.subject.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_groups_sorted_by_title() {
        let commits = vec![
            make_commit(Some("Features"), None, "a"),
            make_commit(Some("Bug Fixes"), None, "b"),
            make_commit(Some("Features"), None, "c"),
        ];

        let (groups, notes) = GroupingPolicy::default().group(commits);
        let titles: Vec<_> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Bug Fixes", "Features"]);
        assert_eq!(subjects(&groups[1]), ["a", "c"]);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_appearance_order() {
        let policy = GroupingPolicy {
            commit_groups_sort: GroupOrder::Appearance,
            ..GroupingPolicy::default()
        };
        let commits = vec![
            make_commit(Some("Features"), None, "a"),
            make_commit(Some("Bug Fixes"), None, "b"),
        ];

        let (groups, _) = policy.group(commits);
        assert_eq!(groups[0].title, "Features");
        assert_eq!(groups[1].title, "Bug Fixes");
    }

    #[test]
    fn test_commits_sorted_by_scope_then_subject() {
        let commits = vec![
            make_commit(Some("Features"), Some("ui"), "b"),
            make_commit(Some("Features"), Some("api"), "z"),
            make_commit(Some("Features"), None, "y"),
            make_commit(Some("Features"), Some("ui"), "a"),
        ];

        let (groups, _) = GroupingPolicy::default().group(commits);
        assert_eq!(subjects(&groups[0]), ["y", "z", "a", "b"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut commits = vec![
            make_commit(Some("Features"), Some("api"), "same"),
            make_commit(Some("Features"), Some("api"), "same"),
        ];
        commits[0].hash = Some("first".to_string());
        commits[1].hash = Some("second".to_string());

        let (groups, _) = GroupingPolicy::default().group(commits);
        assert_eq!(groups[0].commits[0].hash.as_deref(), Some("first"));
        assert_eq!(groups[0].commits[1].hash.as_deref(), Some("second"));
    }

    #[test]
    fn test_missing_type_grouped_under_empty_title() {
        let commits = vec![
            make_commit(Some("Features"), None, "a"),
            make_commit(None, None, "b"),
        ];

        let (groups, _) = GroupingPolicy::default().group(commits);
        assert_eq!(groups[0].title, "");
        assert_eq!(subjects(&groups[0]), ["b"]);
    }

    #[test]
    fn test_notes_carry_commit_scope_and_hash() {
        let mut first = make_commit(Some("Features"), Some("api"), "a");
        first.notes = vec![
            Note::new("BREAKING CHANGES", "zeta"),
            Note::new("BREAKING CHANGES", "alpha"),
        ];
        let mut second = make_commit(Some("Bug Fixes"), None, "b");
        second.notes = vec![Note::new("DEPRECATIONS", "old flag")];

        let (_, notes) = GroupingPolicy::default().group(vec![first, second]);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "BREAKING CHANGES");
        assert_eq!(notes[0].notes[0].text, "alpha");
        assert_eq!(notes[0].notes[0].scope.as_deref(), Some("api"));
        assert_eq!(notes[0].notes[0].hash.as_deref(), Some("abc1234"));
        assert_eq!(notes[1].title, "DEPRECATIONS");
        assert!(notes[1].notes[0].scope.is_none());
    }

    #[test]
    fn test_empty_input() {
        let (groups, notes) = GroupingPolicy::default().group(Vec::new());
        assert!(groups.is_empty());
        assert!(notes.is_empty());
    }
}
