//! Conventional commit parser plugin.
//!
//! Splits a commit message into header fields, body, footer, notes and issue
//! references, following a grammar made of a header pattern, a revert
//! pattern and a list of note keywords.

use std::sync::LazyLock;

use regex::Regex;
use ticklog_commit::{Note, ParsedCommit, RawCommit, Reference, Revert};
use ticklog_plugin::{CommitParser, Plugin, PluginError, PluginResult};
use tracing::debug;

/// Default header pattern: `type(scope): subject`.
pub const DEFAULT_HEADER_PATTERN: &str = r"^(\w*)(?:\((.*)\))?: (.*)$";

/// Default revert pattern, matched case-insensitively against the whole message.
pub const DEFAULT_REVERT_PATTERN: &str =
    r#"(?i)^(?:Revert|revert:)\s"?([\s\S]+?)"?\s*This reverts commit (\w*)\."#;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([\w-]+)").expect("invalid regex"));

/// Issue tracker keys such as `ABC-123`, accepted after a reference action.
static TRACKER_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Z0-9]*-[0-9]+\b").expect("invalid regex"));

/// Grammar used by [`ConventionalParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Pattern applied to the first line of the message.
    pub header_pattern: String,

    /// Field names for the capture groups of the header pattern, in order.
    pub header_correspondence: Vec<String>,

    /// Pattern applied to the whole message to detect reverts.
    pub revert_pattern: String,

    /// Field names for the capture groups of the revert pattern, in order.
    pub revert_correspondence: Vec<String>,

    /// Keywords that open a note, e.g. `BREAKING CHANGE`.
    pub note_keywords: Vec<String>,

    /// Prefixes that mark an issue reference, e.g. `#`.
    pub issue_prefixes: Vec<String>,

    /// Footer keywords that introduce issue references, e.g. `Closes`.
    pub reference_actions: Vec<String>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            header_pattern: DEFAULT_HEADER_PATTERN.to_string(),
            header_correspondence: strings(&["type", "scope", "subject"]),
            revert_pattern: DEFAULT_REVERT_PATTERN.to_string(),
            revert_correspondence: strings(&["header", "hash"]),
            note_keywords: strings(&["BREAKING CHANGE", "BREAKING CHANGES"]),
            issue_prefixes: strings(&["#"]),
            reference_actions: strings(&[
                "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves",
                "resolved", "ref", "refs",
            ]),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn compile(pattern: &str) -> PluginResult<Regex> {
    Regex::new(pattern).map_err(|e| PluginError::InvalidPattern {
        pattern: pattern.to_string(),
        source: Box::new(e),
    })
}

fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

/// Conventional commit parser.
#[derive(Debug)]
pub struct ConventionalParser {
    options: ParserOptions,
    header: Regex,
    revert: Regex,
    note: Option<Regex>,
    action: Option<Regex>,
    reference: Option<Regex>,
}

impl ConventionalParser {
    /// Creates a parser with the default grammar.
    ///
    /// # Panics
    ///
    /// Panics if the built-in grammar fails to compile.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default()).expect("default grammar compiles")
    }

    /// Creates a parser with a custom grammar.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern does not compile, a correspondence
    /// names an unknown field or a keyword list holds an empty entry.
    pub fn with_options(options: ParserOptions) -> PluginResult<Self> {
        for field in &options.header_correspondence {
            if !matches!(field.as_str(), "type" | "scope" | "subject") {
                return Err(PluginError::ConfigError(format!(
                    "unknown header field `{field}`"
                )));
            }
        }
        for field in &options.revert_correspondence {
            if !matches!(field.as_str(), "header" | "hash") {
                return Err(PluginError::ConfigError(format!(
                    "unknown revert field `{field}`"
                )));
            }
        }

        for (field, words) in [
            ("note keyword", &options.note_keywords),
            ("issue prefix", &options.issue_prefixes),
            ("reference action", &options.reference_actions),
        ] {
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err(PluginError::ConfigError(format!("empty {field}")));
            }
        }

        let header = compile(&options.header_pattern)?;
        let revert = compile(&options.revert_pattern)?;

        let note = if options.note_keywords.is_empty() {
            None
        } else {
            Some(compile(&format!(
                r"^[\s|*]*({})[:\s]+(.*)$",
                alternation(&options.note_keywords)
            ))?)
        };

        let action = if options.reference_actions.is_empty() {
            None
        } else {
            Some(compile(&format!(
                r"(?i)^\s*({})\b:?\s+(.*)$",
                alternation(&options.reference_actions)
            ))?)
        };

        let reference = if options.issue_prefixes.is_empty() {
            None
        } else {
            Some(compile(&format!(
                r"(?:^|[\s(,\[])(?:([\w-]+)/([\w.-]+))?({})([\w-]+)",
                alternation(&options.issue_prefixes)
            ))?)
        };

        Ok(Self {
            options,
            header,
            revert,
            note,
            action,
            reference,
        })
    }

    /// Returns the grammar this parser was built with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    fn parse_header(&self, header: &str, commit: &mut ParsedCommit) {
        let Some(caps) = self.header.captures(header) else {
            debug!(header, "header does not match the grammar");
            return;
        };

        for (idx, field) in self.options.header_correspondence.iter().enumerate() {
            let value = caps.get(idx + 1).map(|m| m.as_str().to_string());
            match field.as_str() {
                "type" => commit.r#type = value,
                "scope" => commit.scope = value,
                "subject" => commit.subject = value,
                _ => {}
            }
        }
    }

    fn parse_revert(&self, message: &str) -> Option<Revert> {
        let caps = self.revert.captures(message)?;
        let mut revert = Revert::default();

        for (idx, field) in self.options.revert_correspondence.iter().enumerate() {
            let value = caps.get(idx + 1).map(|m| m.as_str().to_string());
            match field.as_str() {
                "header" => revert.header = value,
                "hash" => revert.hash = value,
                _ => {}
            }
        }

        Some(revert)
    }

    fn is_note(&self, line: &str) -> bool {
        self.note.as_ref().is_some_and(|re| re.is_match(line))
    }

    /// Splits a reference action line into its keyword and the text after it.
    ///
    /// The line only counts when that text names at least one issue.
    fn action_line<'l>(&self, line: &'l str) -> Option<(&'l str, &'l str)> {
        let caps = self.action.as_ref()?.captures(line)?;
        let action = caps.get(1)?.as_str();
        let rest = caps.get(2)?.as_str();

        let names_issue = self.reference.as_ref().is_some_and(|re| re.is_match(rest))
            || TRACKER_KEY_RE.is_match(rest);
        names_issue.then_some((action, rest))
    }

    fn references_in(&self, text: &str, action: Option<&str>) -> Vec<Reference> {
        let Some(re) = &self.reference else {
            return Vec::new();
        };

        re.captures_iter(text)
            .map(|caps| {
                let prefix = caps.get(3).map_or("", |m| m.as_str());
                let issue = caps.get(4).map_or("", |m| m.as_str());
                let raw_start = caps
                    .get(1)
                    .or_else(|| caps.get(3))
                    .map_or(0, |m| m.start());
                Reference {
                    action: action.map(str::to_string),
                    owner: caps.get(1).map(|m| m.as_str().to_string()),
                    repository: caps.get(2).map(|m| m.as_str().to_string()),
                    issue: Some(issue.to_string()),
                    raw: text[raw_start..caps.get(4).map_or(raw_start, |m| m.end())].to_string(),
                    prefix: prefix.to_string(),
                }
            })
            .collect()
    }

    fn parse_footer(&self, lines: &[&str], commit: &mut ParsedCommit) {
        let mut open_note: Option<usize> = None;

        for line in lines {
            if let Some(caps) = self.note.as_ref().and_then(|re| re.captures(line)) {
                commit.notes.push(Note::new(&caps[1], &caps[2]));
                open_note = Some(commit.notes.len() - 1);
            } else if let Some((action, rest)) = self.action_line(line) {
                let references = self.references_in(rest, Some(action));
                commit.references.extend(references);
                open_note = None;
            } else if let Some(idx) = open_note {
                let text = &mut commit.notes[idx].text;
                text.push('\n');
                text.push_str(line);
            }
        }

        for note in &mut commit.notes {
            note.text = note.text.trim().to_string();
        }
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ConventionalParser {
    fn name(&self) -> &'static str {
        "conventional"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Parses conventional commits with breaking-change notes and issue references"
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, raw: &RawCommit) -> Option<ParsedCommit> {
        let message = raw.message.trim();
        if message.is_empty() {
            return None;
        }

        let mut lines = message.lines();
        let header = lines.next()?.trim_end();
        let rest: Vec<&str> = lines.collect();

        let mut commit = ParsedCommit {
            hash: Some(raw.hash.clone()),
            header: Some(header.to_string()),
            ..ParsedCommit::default()
        };

        self.parse_header(header, &mut commit);
        commit.references = self.references_in(header, None);
        commit.revert = self.parse_revert(message);

        let footer_start = rest
            .iter()
            .position(|line| self.is_note(line) || self.action_line(line).is_some())
            .unwrap_or(rest.len());
        let (body, footer) = rest.split_at(footer_start);

        commit.body = Some(body.join("\n").trim().to_string()).filter(|b| !b.is_empty());
        commit.footer = Some(footer.join("\n").trim().to_string()).filter(|f| !f.is_empty());
        self.parse_footer(footer, &mut commit);

        commit.mentions = MENTION_RE
            .captures_iter(message)
            .map(|caps| caps[1].to_string())
            .collect();

        Some(commit)
    }
}
