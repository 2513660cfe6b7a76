//! Commit type classification.
//!
//! The rules are evaluated in order and the first one that applies wins.
//! The discard gate sits between the revert rule and the documentation
//! rule: a commit without notes is dropped unless it is a feature, a fix, a
//! performance improvement or a revert. Commits with notes skip the gate
//! and may end up keeping their original type.

use ticklog_commit::Note;

/// Title every note is filed under.
pub const BREAKING_CHANGES: &str = "BREAKING CHANGES";

/// Outcome of classifying a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The commit is listed under this section title.
    Section(&'static str),
    /// The commit is kept with its original type.
    Unclassified,
    /// The commit is left out of the changelog.
    Discard,
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    Type {
        tag: &'static str,
        title: &'static str,
    },
    Revert,
    DiscardGate,
}

const RULES: [Rule; 10] = [
    Rule::Type {
        tag: "feat",
        title: "Features",
    },
    Rule::Type {
        tag: "fix",
        title: "Bug Fixes",
    },
    Rule::Type {
        tag: "perf",
        title: "Performance Improvements",
    },
    Rule::Revert,
    Rule::DiscardGate,
    Rule::Type {
        tag: "docs",
        title: "Documentation",
    },
    Rule::Type {
        tag: "style",
        title: "Styles",
    },
    Rule::Type {
        tag: "refactor",
        title: "Code Refactoring",
    },
    Rule::Type {
        tag: "test",
        title: "Tests",
    },
    Rule::Type {
        tag: "chore",
        title: "Chores",
    },
];

/// Classifies a commit by its type tag, revert flag and note count.
#[must_use]
pub fn classify(commit_type: Option<&str>, revert: bool, has_notes: bool) -> Classification {
    let discard = !has_notes;

    for rule in RULES {
        match rule {
            Rule::Type { tag, title } if commit_type == Some(tag) => {
                return Classification::Section(title);
            }
            Rule::Revert if revert || commit_type == Some("revert") => {
                return Classification::Section("Reverts");
            }
            Rule::DiscardGate if discard => return Classification::Discard,
            _ => {}
        }
    }

    Classification::Unclassified
}

/// Files every note under [`BREAKING_CHANGES`].
///
/// Returns true if there was at least one note.
pub fn retitle_notes(notes: &mut [Note]) -> bool {
    for note in notes.iter_mut() {
        BREAKING_CHANGES.clone_into(&mut note.title);
    }
    !notes.is_empty()
}
