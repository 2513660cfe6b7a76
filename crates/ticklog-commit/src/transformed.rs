//! Display-ready commit produced by a commit transformer.

use serde::Serialize;

use crate::{Note, ParsedCommit, Reference, Revert};

/// A commit after transformation, ready to be grouped and rendered.
///
/// The structured references of the parsed commit are kept in
/// `raw_references`; the renderer only sees the `references` display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformedCommit {
    /// The short hash.
    pub hash: Option<String>,

    /// The section title, or the original type when it was left unclassified.
    pub r#type: Option<String>,

    /// The scope, empty when the commit applied to every scope.
    pub scope: Option<String>,

    /// The subject with issue mentions rewritten.
    pub subject: Option<String>,

    /// The original header.
    pub header: Option<String>,

    /// The original body.
    pub body: Option<String>,

    /// The original footer.
    pub footer: Option<String>,

    /// Notes, retitled by the transformer.
    pub notes: Vec<Note>,

    /// Comma-joined, formatted issue references.
    pub references: String,

    /// The structured references the display string was built from.
    #[serde(skip)]
    pub raw_references: Vec<Reference>,

    /// Issues collected while transforming, including subject mentions.
    #[serde(skip)]
    pub issues: Vec<String>,

    /// `@name` mentions.
    pub mentions: Vec<String>,

    /// Revert information.
    pub revert: Option<Revert>,
}

impl TransformedCommit {
    /// Moves every field of a parsed commit over, with an empty display string.
    #[must_use]
    pub fn from_parsed(commit: ParsedCommit) -> Self {
        Self {
            hash: commit.hash,
            r#type: commit.r#type,
            scope: commit.scope,
            subject: commit.subject,
            header: commit.header,
            body: commit.body,
            footer: commit.footer,
            notes: commit.notes,
            references: String::new(),
            raw_references: commit.references,
            issues: Vec::new(),
            mentions: commit.mentions,
            revert: commit.revert,
        }
    }

    /// Returns the title of the group this commit belongs to.
    #[must_use]
    pub fn group_title(&self) -> &str {
        self.r#type.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parsed_moves_references() {
        let parsed = ParsedCommit::builder()
            .r#type("fix")
            .reference(Reference::to_issue("7"))
            .build();

        let commit = TransformedCommit::from_parsed(parsed);
        assert_eq!(commit.raw_references.len(), 1);
        assert!(commit.references.is_empty());
        assert_eq!(commit.group_title(), "fix");
    }

    #[test]
    fn test_group_title_without_type() {
        let commit = TransformedCommit::from_parsed(ParsedCommit::default());
        assert_eq!(commit.group_title(), "");
    }

    #[test]
    fn test_serialize_hides_internal_fields() {
        let mut commit = TransformedCommit::from_parsed(
            ParsedCommit::builder()
                .reference(Reference::to_issue("7"))
                .build(),
        );
        commit.references = "#7".to_string();
        commit.issues = vec!["7".to_string()];

        let json = serde_json::to_value(&commit).unwrap();
        assert_eq!(json["references"], "#7");
        assert!(json.get("raw_references").is_none());
        assert!(json.get("issues").is_none());
    }
}
