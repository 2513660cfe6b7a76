//! Angular-style commit transform with issue tracker key extraction.
//!
//! Each parsed commit is classified into a changelog section, its issue
//! references are collected from the structured references and from tracker
//! keys (`ABC-123`) in the footer, and inline `#issue` mentions in the
//! subject are turned into links when the package declares an issue tracker.

mod classify;
mod format;
mod issues;

use std::sync::LazyLock;

use regex::{Captures, Regex};
use ticklog_commit::{ParsedCommit, TransformedCommit};
use ticklog_plugin::{CommitTransformer, Plugin, WriterContext};
use tracing::{debug, trace};

pub use classify::{BREAKING_CHANGES, Classification, classify, retitle_notes};
pub use format::{IssueFormatter, format_issue};
pub use issues::{extract_issues, footer_issues};

/// Inline issue mentions in the subject.
static SUBJECT_ISSUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([a-zA-Z0-9-]+)").expect("invalid regex"));

/// Length of the displayed commit hash.
const SHORT_HASH_LEN: usize = 7;

/// Commit transform for Angular-style changelogs with tracker keys.
pub struct JiraTransform;

impl JiraTransform {
    /// Creates a new transform.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for JiraTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for JiraTransform {
    fn name(&self) -> &'static str {
        "jira"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Classifies commits into Angular sections and links tracker issues"
    }
}

impl CommitTransformer for JiraTransform {
    fn transform(&self, commit: ParsedCommit, ctx: &WriterContext) -> Option<TransformedCommit> {
        let formatter = IssueFormatter::new(ctx.issue_url());
        let revert = commit.is_revert();
        let mut commit = TransformedCommit::from_parsed(commit);

        let mut issues = extract_issues(&commit.raw_references, commit.footer.as_deref());
        commit.references = formatter.join(&issues);

        let has_notes = retitle_notes(&mut commit.notes);
        match classify(commit.r#type.as_deref(), revert, has_notes) {
            Classification::Section(title) => commit.r#type = Some(title.to_string()),
            Classification::Unclassified => {}
            Classification::Discard => {
                debug!(
                    commit_type = commit.r#type.as_deref().unwrap_or_default(),
                    header = commit.header.as_deref().unwrap_or_default(),
                    "discarding commit"
                );
                return None;
            }
        }

        if commit.scope.as_deref() == Some("*") {
            commit.scope = Some(String::new());
        }

        if let Some(hash) = &mut commit.hash
            && let Some((idx, _)) = hash.char_indices().nth(SHORT_HASH_LEN)
        {
            hash.truncate(idx);
        }

        // Mentions found here are recorded in `issues` only; the display
        // references were fixed above.
        if let Some(subject) = commit.subject.take() {
            let rewritten = SUBJECT_ISSUE_RE.replace_all(&subject, |caps: &Captures<'_>| {
                let issue = &caps[1];
                trace!(issue, "recording subject issue mention");
                issues.push(issue.to_string());
                formatter.format(issue)
            });
            commit.subject = Some(rewritten.into_owned());
        }

        commit.issues = issues;
        Some(commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticklog_commit::{Note, Reference, Revert};
    use ticklog_plugin::PackageData;

    const TRACKER: &str = "https://jira.example.com/browse";

    fn plain() -> WriterContext {
        WriterContext::default()
    }

    fn linked() -> WriterContext {
        WriterContext::new(PackageData::default().with_bugs_url(TRACKER))
    }

    fn transform(commit: ParsedCommit, ctx: &WriterContext) -> Option<TransformedCommit> {
        JiraTransform::new().transform(commit, ctx)
    }

    #[test]
    fn test_plugin_metadata() {
        let transform = JiraTransform;
        assert_eq!(transform.name(), "jira");
        assert_eq!(transform.version(), env!("CARGO_PKG_VERSION"));
        assert!(!transform.description().is_empty());
    }

    #[test]
    fn test_feature_is_titled() {
        let commit = ParsedCommit::builder()
            .r#type("feat")
            .subject("add login")
            .build();
        let out = transform(commit, &plain()).unwrap();
        assert_eq!(out.r#type.as_deref(), Some("Features"));
        assert_eq!(out.references, "");
    }

    #[test]
    fn test_unknown_type_without_notes_is_discarded() {
        let commit = ParsedCommit::builder().r#type("obscure").build();
        assert!(transform(commit, &plain()).is_none());
    }

    #[test]
    fn test_chore_without_notes_is_discarded() {
        let commit = ParsedCommit::builder()
            .r#type("chore")
            .hash("abcdef1234567890")
            .build();
        assert!(transform(commit, &plain()).is_none());
    }

    #[test]
    fn test_unknown_type_with_note_survives_unclassified() {
        let commit = ParsedCommit::builder()
            .r#type("obscure")
            .note(Note::new("BREAKING CHANGE", "everything moved"))
            .build();
        let out = transform(commit, &plain()).unwrap();
        assert_eq!(out.r#type.as_deref(), Some("obscure"));
        assert_eq!(out.notes[0].title, BREAKING_CHANGES);
        assert_eq!(out.notes[0].text, "everything moved");
    }

    #[test]
    fn test_chore_with_note_is_titled() {
        let commit = ParsedCommit::builder()
            .r#type("chore")
            .note(Note::new("BREAKING CHANGES", "drop node 14"))
            .build();
        let out = transform(commit, &plain()).unwrap();
        assert_eq!(out.r#type.as_deref(), Some("Chores"));
    }

    #[test]
    fn test_revert_flag() {
        let commit = ParsedCommit::builder()
            .revert(Revert {
                header: Some("feat: login".to_string()),
                hash: Some("1234567".to_string()),
            })
            .build();
        let out = transform(commit, &plain()).unwrap();
        assert_eq!(out.r#type.as_deref(), Some("Reverts"));
    }

    #[test]
    fn test_wildcard_scope_is_cleared() {
        let commit = ParsedCommit::builder().r#type("fix").scope("*").build();
        let out = transform(commit, &plain()).unwrap();
        assert_eq!(out.scope.as_deref(), Some(""));
    }

    #[test]
    fn test_scope_is_kept() {
        let commit = ParsedCommit::builder().r#type("fix").scope("api").build();
        let out = transform(commit, &plain()).unwrap();
        assert_eq!(out.scope.as_deref(), Some("api"));
    }

    #[test]
    fn test_hash_is_shortened() {
        let commit = ParsedCommit::builder()
            .r#type("fix")
            .hash("abcdef1234567890")
            .build();
        let out = transform(commit, &plain()).unwrap();
        assert_eq!(out.hash.as_deref(), Some("abcdef1"));
    }

    #[test]
    fn test_short_and_missing_hash() {
        let commit = ParsedCommit::builder().r#type("fix").hash("abc").build();
        assert_eq!(
            transform(commit, &plain()).unwrap().hash.as_deref(),
            Some("abc")
        );

        let commit = ParsedCommit::builder().r#type("fix").build();
        assert!(transform(commit, &plain()).unwrap().hash.is_none());
    }

    #[test]
    fn test_subject_mention_without_tracker() {
        let commit = ParsedCommit::builder()
            .r#type("fix")
            .subject("fix #99 thing")
            .build();
        let out = transform(commit, &plain()).unwrap();
        assert_eq!(out.subject.as_deref(), Some("fix #99 thing"));
        assert_eq!(out.issues, vec!["99"]);
        assert_eq!(out.references, "");
    }

    #[test]
    fn test_subject_mention_with_tracker() {
        let commit = ParsedCommit::builder()
            .r#type("fix")
            .subject("fix #99 thing")
            .build();
        let out = transform(commit, &linked()).unwrap();
        assert_eq!(
            out.subject.as_deref(),
            Some("fix [#99](https://jira.example.com/browse/99) thing")
        );
    }

    #[test]
    fn test_subject_tracker_key_mention() {
        let commit = ParsedCommit::builder()
            .r#type("feat")
            .subject("support #PROJ-12 and #PROJ-13")
            .build();
        let out = transform(commit, &linked()).unwrap();
        assert_eq!(
            out.subject.as_deref(),
            Some(
                "support [#PROJ-12](https://jira.example.com/browse/PROJ-12) and \
                 [#PROJ-13](https://jira.example.com/browse/PROJ-13)"
            )
        );
        assert_eq!(out.issues, vec!["PROJ-12", "PROJ-13"]);
    }

    #[test]
    fn test_references_from_parser_and_footer() {
        let commit = ParsedCommit::builder()
            .r#type("fix")
            .reference(Reference::to_issue("12").with_action("Closes"))
            .reference(Reference::to_issue("12"))
            .footer("Closes #12\nRefs ABC-1, ABC-2")
            .build();
        let out = transform(commit, &linked()).unwrap();
        assert_eq!(
            out.references,
            "[#12](https://jira.example.com/browse/12), \
             [#ABC-1](https://jira.example.com/browse/ABC-1), \
             [#ABC-2](https://jira.example.com/browse/ABC-2)"
        );
        assert_eq!(out.raw_references.len(), 2);
    }

    #[test]
    fn test_subject_mentions_do_not_change_references() {
        let commit = ParsedCommit::builder()
            .r#type("fix")
            .subject("handle #7")
            .footer("Refs ABC-1")
            .build();
        let out = transform(commit, &plain()).unwrap();
        assert_eq!(out.references, "#ABC-1");
        assert_eq!(out.issues, vec!["ABC-1", "7"]);
    }

    #[test]
    fn test_style_with_wildcard_scope_is_discarded() {
        let commit = ParsedCommit::builder()
            .r#type("style")
            .scope("*")
            .subject("format #3")
            .build();
        assert!(transform(commit, &linked()).is_none());
    }

    #[test]
    fn test_missing_type_is_discarded() {
        let commit = ParsedCommit::builder().header("random message").build();
        assert!(transform(commit, &plain()).is_none());
    }

    #[test]
    fn test_serialized_references_are_a_string() {
        let commit = ParsedCommit::builder()
            .r#type("feat")
            .reference(Reference::to_issue("#5"))
            .build();
        let out = transform(commit, &plain()).unwrap();
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["references"], "#5");
        assert_eq!(json["type"], "Features");
    }
}
