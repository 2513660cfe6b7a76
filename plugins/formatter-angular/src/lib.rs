//! Angular-style Markdown changelog formatter.
//!
//! Renders one release section: a version header with an optional compare
//! link, one `###` section per commit group and a footer listing the note
//! groups (breaking changes).

use std::fmt::Write;

use ticklog_commit::TransformedCommit;
use ticklog_plugin::{ChangelogFormatter, FormatterConfig, NoteEntry, Plugin, Release};

/// Markdown formatter in the style of the Angular changelog.
pub struct AngularFormatter;

impl AngularFormatter {
    /// Creates a new formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn header(release: &Release) -> String {
        let version = &release.version;
        let mut header = match (&release.repository_url, &release.previous_version) {
            (Some(repo), Some(prev)) => {
                format!("## [{version}]({repo}/compare/v{prev}...v{version})")
            }
            _ => format!("## {version}"),
        };

        if let Some(title) = release.title.as_deref().filter(|t| !t.is_empty()) {
            _ = write!(header, " \"{title}\"");
        }
        _ = write!(header, " ({})", release.date.format("%Y-%m-%d"));
        header
    }

    fn commit_line(
        commit: &TransformedCommit,
        repository_url: Option<&str>,
        config: &FormatterConfig,
    ) -> String {
        let mut line = String::from("*");
        if let Some(scope) = commit.scope.as_deref().filter(|s| !s.is_empty()) {
            _ = write!(line, " **{scope}:**");
        }

        let text = commit
            .subject
            .as_deref()
            .or(commit.header.as_deref())
            .unwrap_or_default();
        _ = write!(line, " {text}");

        if config.include_hashes
            && let Some(hash) = commit.hash.as_deref().filter(|h| !h.is_empty())
        {
            match repository_url {
                Some(repo) => {
                    _ = write!(line, " ([{hash}]({repo}/commit/{hash}))");
                }
                None => {
                    _ = write!(line, " ({hash})");
                }
            }
        }

        if config.include_references && !commit.references.is_empty() {
            _ = write!(line, ", closes {}", commit.references);
        }

        line
    }

    fn note_line(note: &NoteEntry) -> String {
        match note.scope.as_deref().filter(|s| !s.is_empty()) {
            Some(scope) => format!("* **{scope}:** {}", note.text),
            None => format!("* {}", note.text),
        }
    }
}

impl Default for AngularFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for AngularFormatter {
    fn name(&self) -> &'static str {
        "angular"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Formats changelog sections in the Angular style"
    }
}

impl ChangelogFormatter for AngularFormatter {
    fn format(&self, release: &Release, config: &FormatterConfig) -> String {
        let mut output = Self::header(release);
        output.push('\n');

        let repository_url = release.repository_url.as_deref();
        for group in release.commit_groups.iter().filter(|g| !g.commits.is_empty()) {
            output.push('\n');
            if !group.title.is_empty() {
                _ = writeln!(output, "### {}\n", group.title);
            }
            for commit in &group.commits {
                _ = writeln!(output, "{}", Self::commit_line(commit, repository_url, config));
            }
        }

        for group in release.note_groups.iter().filter(|g| !g.notes.is_empty()) {
            _ = writeln!(output, "\n### {}\n", group.title);
            for note in &group.notes {
                _ = writeln!(output, "{}", Self::note_line(note));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use semver::Version;
    use ticklog_commit::ParsedCommit;
    use ticklog_plugin::{CommitGroup, NoteGroup};

    const REPO: &str = "https://github.com/acme/widget";

    fn make_commit(scope: Option<&str>, subject: &str, hash: &str) -> TransformedCommit {
        let mut builder = ParsedCommit::builder().subject(subject).hash(hash);
        if let Some(scope) = scope {
            builder = builder.scope(scope);
        }
        TransformedCommit::from_parsed(builder.build())
    }

    fn make_group(title: &str, commits: Vec<TransformedCommit>) -> CommitGroup {
        CommitGroup {
            title: title.to_string(),
            commits,
        }
    }

    fn make_release(groups: Vec<CommitGroup>, notes: Vec<NoteGroup>) -> Release {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
        Release::new(Version::new(1, 1, 0), date).with_groups(groups, notes)
    }

    fn format(release: &Release) -> String {
        AngularFormatter::new().format(release, &FormatterConfig::default())
    }

    #[test]
    fn test_plugin_metadata() {
        let formatter = AngularFormatter;
        assert_eq!(formatter.name(), "angular");
        assert_eq!(formatter.version(), env!("CARGO_PKG_VERSION"));
        assert!(!formatter.description().is_empty());
        assert_eq!(formatter.extension(), "md");
    }

    #[test]
    fn test_header_without_links() {
        let release = make_release(vec![], vec![]);
        assert_eq!(format(&release), "## 1.1.0 (2024-01-15)\n");
    }

    #[test]
    fn test_header_with_compare_link() {
        let release = make_release(vec![], vec![])
            .with_previous_version(Version::new(1, 0, 0))
            .with_repository_url(REPO);
        assert_eq!(
            format(&release),
            "## [1.1.0](https://github.com/acme/widget/compare/v1.0.0...v1.1.0) (2024-01-15)\n"
        );
    }

    #[test]
    fn test_header_needs_previous_version_for_link() {
        let release = make_release(vec![], vec![]).with_repository_url(REPO);
        assert!(!format(&release).contains("compare"));
    }

    #[test]
    fn test_header_with_title() {
        let release = make_release(vec![], vec![]).with_title("Spring");
        assert_eq!(format(&release), "## 1.1.0 \"Spring\" (2024-01-15)\n");
    }

    #[test]
    fn test_commit_with_scope_and_hash() {
        let release = make_release(
            vec![make_group(
                "Features",
                vec![make_commit(Some("api"), "add endpoint", "abc1234")],
            )],
            vec![],
        );
        assert_eq!(
            format(&release),
            "## 1.1.0 (2024-01-15)\n\n### Features\n\n* **api:** add endpoint (abc1234)\n"
        );
    }

    #[test]
    fn test_empty_scope_is_omitted() {
        let release = make_release(
            vec![make_group("Bug Fixes", vec![make_commit(Some(""), "fix", "abc1234")])],
            vec![],
        );
        assert!(format(&release).contains("\n* fix (abc1234)\n"));
    }

    #[test]
    fn test_commit_hash_link() {
        let release = make_release(
            vec![make_group("Features", vec![make_commit(None, "add", "abc1234")])],
            vec![],
        )
        .with_repository_url(REPO);
        assert!(format(&release).contains(
            "* add ([abc1234](https://github.com/acme/widget/commit/abc1234))"
        ));
    }

    #[test]
    fn test_hashes_disabled() {
        let release = make_release(
            vec![make_group("Features", vec![make_commit(None, "add", "abc1234")])],
            vec![],
        );
        let config = FormatterConfig {
            include_hashes: false,
            ..FormatterConfig::default()
        };
        let output = AngularFormatter::new().format(&release, &config);
        assert!(output.contains("\n* add\n"));
    }

    #[test]
    fn test_references() {
        let mut commit = make_commit(None, "fix crash", "abc1234");
        commit.references = "#12, #ABC-1".to_string();
        let release = make_release(vec![make_group("Bug Fixes", vec![commit])], vec![]);

        assert!(format(&release).contains("* fix crash (abc1234), closes #12, #ABC-1\n"));

        let config = FormatterConfig {
            include_references: false,
            ..FormatterConfig::default()
        };
        let output = AngularFormatter::new().format(&release, &config);
        assert!(!output.contains("closes"));
    }

    #[test]
    fn test_subject_falls_back_to_header() {
        let commit = TransformedCommit::from_parsed(
            ParsedCommit::builder().header("Merge branch 'main'").build(),
        );
        let release = make_release(vec![make_group("", vec![commit])], vec![]);
        assert_eq!(
            format(&release),
            "## 1.1.0 (2024-01-15)\n\n* Merge branch 'main'\n"
        );
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let release = make_release(
            vec![make_group("Features", vec![])],
            vec![NoteGroup {
                title: "BREAKING CHANGES".to_string(),
                notes: vec![],
            }],
        );
        assert_eq!(format(&release), "## 1.1.0 (2024-01-15)\n");
    }

    #[test]
    fn test_full_release() {
        let mut fix = make_commit(Some("parser"), "handle empty footer", "1a2b3c4");
        fix.references = "[#PROJ-7](https://jira.example.com/browse/PROJ-7)".to_string();

        let release = make_release(
            vec![
                make_group("Bug Fixes", vec![fix]),
                make_group(
                    "Features",
                    vec![
                        make_commit(Some("api"), "add search", "5d6e7f8"),
                        make_commit(None, "support dark mode", "9a0b1c2"),
                    ],
                ),
            ],
            vec![NoteGroup {
                title: "BREAKING CHANGES".to_string(),
                notes: vec![NoteEntry {
                    title: "BREAKING CHANGES".to_string(),
                    text: "the search endpoint now requires a token".to_string(),
                    scope: Some("api".to_string()),
                    hash: Some("5d6e7f8".to_string()),
                }],
            }],
        )
        .with_previous_version(Version::new(1, 0, 0))
        .with_repository_url(REPO);

        insta::assert_snapshot!(format(&release), @r"
        ## [1.1.0](https://github.com/acme/widget/compare/v1.0.0...v1.1.0) (2024-01-15)

        ### Bug Fixes

        * **parser:** handle empty footer ([1a2b3c4](https://github.com/acme/widget/commit/1a2b3c4)), closes [#PROJ-7](https://jira.example.com/browse/PROJ-7)

        ### Features

        * **api:** add search ([5d6e7f8](https://github.com/acme/widget/commit/5d6e7f8))
        * support dark mode ([9a0b1c2](https://github.com/acme/widget/commit/9a0b1c2))

        ### BREAKING CHANGES

        * **api:** the search endpoint now requires a token
        ");
    }
}
