//! Parsed commit type after the grammar has split the message into fields.

use serde::{Deserialize, Serialize};

/// A commit after parsing.
///
/// Every field the grammar may fail to produce is optional. A commit whose
/// header does not match the header pattern has no `type`, `scope` or
/// `subject`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// The full commit hash (SHA).
    pub hash: Option<String>,

    /// The commit type tag (feat, fix, docs, ...).
    pub r#type: Option<String>,

    /// The optional scope. `"*"` means "every scope".
    pub scope: Option<String>,

    /// The header text after the type and scope prefix.
    pub subject: Option<String>,

    /// The first line of the message.
    pub header: Option<String>,

    /// Free text between the header and the footer.
    pub body: Option<String>,

    /// Free text starting at the first note or reference line.
    pub footer: Option<String>,

    /// Notes such as `BREAKING CHANGE`.
    #[serde(default)]
    pub notes: Vec<Note>,

    /// Structured issue references.
    #[serde(default)]
    pub references: Vec<Reference>,

    /// `@name` mentions found anywhere in the message.
    #[serde(default)]
    pub mentions: Vec<String>,

    /// Set when the message matches the revert pattern.
    pub revert: Option<Revert>,
}

impl ParsedCommit {
    /// Creates a new parsed commit builder.
    #[must_use]
    pub fn builder() -> ParsedCommitBuilder {
        ParsedCommitBuilder::default()
    }

    /// Returns true if this commit reverts another one.
    #[must_use]
    pub fn is_revert(&self) -> bool {
        self.revert.is_some()
    }

    /// Returns true if this commit carries at least one note.
    #[must_use]
    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}

/// A note attached to a commit, e.g. a breaking-change description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// The note keyword or the group title it is rendered under.
    pub title: String,

    /// The note text.
    pub text: String,
}

impl Note {
    /// Creates a new note.
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

/// A structured reference to an issue, e.g. `Closes acme/widget#12`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The action keyword (`Closes`, `Fixes`, ...), absent for header references.
    pub action: Option<String>,

    /// Repository owner, when the reference is qualified.
    pub owner: Option<String>,

    /// Repository name, when the reference is qualified.
    pub repository: Option<String>,

    /// The issue identifier.
    pub issue: Option<String>,

    /// The matched text.
    pub raw: String,

    /// The issue prefix (`#`).
    pub prefix: String,
}

impl Reference {
    /// Creates an unqualified reference to the given issue.
    #[must_use]
    pub fn to_issue(issue: impl Into<String>) -> Self {
        let issue = issue.into();
        Self {
            raw: issue.clone(),
            issue: Some(issue),
            ..Self::default()
        }
    }

    /// Sets the action keyword.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

/// What a revert commit reverts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    /// Header of the reverted commit.
    pub header: Option<String>,

    /// Hash of the reverted commit.
    pub hash: Option<String>,
}

/// Builder for [`ParsedCommit`].
#[derive(Debug, Default)]
pub struct ParsedCommitBuilder {
    inner: ParsedCommit,
}

impl ParsedCommitBuilder {
    /// Sets the hash.
    #[must_use]
    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.inner.hash = Some(hash.into());
        self
    }

    /// Sets the type.
    #[must_use]
    pub fn r#type(mut self, r#type: impl Into<String>) -> Self {
        self.inner.r#type = Some(r#type.into());
        self
    }

    /// Sets the scope.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.inner.scope = Some(scope.into());
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.inner.subject = Some(subject.into());
        self
    }

    /// Sets the header.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.inner.header = Some(header.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.inner.body = Some(body.into());
        self
    }

    /// Sets the footer.
    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.inner.footer = Some(footer.into());
        self
    }

    /// Adds a note.
    #[must_use]
    pub fn note(mut self, note: Note) -> Self {
        self.inner.notes.push(note);
        self
    }

    /// Adds a reference.
    #[must_use]
    pub fn reference(mut self, reference: Reference) -> Self {
        self.inner.references.push(reference);
        self
    }

    /// Adds a mention.
    #[must_use]
    pub fn mention(mut self, mention: impl Into<String>) -> Self {
        self.inner.mentions.push(mention.into());
        self
    }

    /// Marks the commit as a revert.
    #[must_use]
    pub fn revert(mut self, revert: Revert) -> Self {
        self.inner.revert = Some(revert);
        self
    }

    /// Builds the [`ParsedCommit`].
    #[must_use]
    pub fn build(self) -> ParsedCommit {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let commit = ParsedCommit::builder()
            .hash("abc123")
            .r#type("feat")
            .scope("api")
            .subject("add new endpoint")
            .reference(Reference::to_issue("42"))
            .build();

        assert_eq!(commit.r#type.as_deref(), Some("feat"));
        assert_eq!(commit.scope.as_deref(), Some("api"));
        assert_eq!(commit.subject.as_deref(), Some("add new endpoint"));
        assert_eq!(commit.references.len(), 1);
        assert!(!commit.is_revert());
        assert!(!commit.has_notes());
    }

    #[test]
    fn test_revert_and_notes() {
        let commit = ParsedCommit::builder()
            .revert(Revert {
                header: Some("feat: thing".to_string()),
                hash: Some("deadbeef".to_string()),
            })
            .note(Note::new("BREAKING CHANGE", "api removed"))
            .build();

        assert!(commit.is_revert());
        assert!(commit.has_notes());
    }

    #[test]
    fn test_reference_to_issue() {
        let reference = Reference::to_issue("12").with_action("Closes");
        assert_eq!(reference.issue.as_deref(), Some("12"));
        assert_eq!(reference.action.as_deref(), Some("Closes"));
        assert!(reference.owner.is_none());
    }

    #[test]
    fn test_deserialize_with_missing_collections() {
        let json = r##"{"hash":null,"type":"fix","scope":null,"subject":"x","header":null,
            "body":null,"footer":null,"revert":null,
            "references":[{"action":null,"owner":null,"repository":null,"issue":null,"raw":"","prefix":"#"}]}"##;
        let commit: ParsedCommit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.r#type.as_deref(), Some("fix"));
        assert!(commit.notes.is_empty());
        assert!(commit.references[0].issue.is_none());
    }
}
