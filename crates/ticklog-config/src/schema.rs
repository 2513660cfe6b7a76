//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Parser configuration.
    #[serde(default)]
    pub parser: ParserConfig,

    /// Transform configuration.
    #[serde(default)]
    pub transform: TransformPluginConfig,

    /// Formatter configuration.
    #[serde(default)]
    pub formatter: FormatterPluginConfig,

    /// Package metadata used for links.
    #[serde(default)]
    pub package: PackageConfig,

    /// Changelog output configuration.
    #[serde(default)]
    pub changelog: ChangelogConfig,
}

impl Config {
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.changelog.output.trim().is_empty() {
            return Err(ConfigError::Invalid("changelog.output is empty".to_string()));
        }
        reject_empty_entries("parser.note_keywords", self.parser.note_keywords.as_deref())?;
        reject_empty_entries("parser.issue_prefixes", self.parser.issue_prefixes.as_deref())?;
        reject_empty_entries(
            "parser.reference_actions",
            self.parser.reference_actions.as_deref(),
        )?;
        Ok(())
    }
}

fn reject_empty_entries(field: &str, values: Option<&[String]>) -> ConfigResult<()> {
    if values.is_some_and(|values| values.iter().any(|v| v.trim().is_empty())) {
        return Err(ConfigError::Invalid(format!("{field} contains an empty entry")));
    }
    Ok(())
}

/// Parser configuration.
///
/// Every grammar field is optional; unset fields keep the parser's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Parser plugin name.
    #[serde(default = "default_parser")]
    pub name: String,

    /// Pattern applied to the commit header.
    pub header_pattern: Option<String>,

    /// Field names for the header capture groups.
    pub header_correspondence: Option<Vec<String>>,

    /// Pattern detecting revert commits.
    pub revert_pattern: Option<String>,

    /// Field names for the revert capture groups.
    pub revert_correspondence: Option<Vec<String>>,

    /// Keywords that open a note.
    pub note_keywords: Option<Vec<String>>,

    /// Issue reference prefixes.
    pub issue_prefixes: Option<Vec<String>>,

    /// Footer keywords that introduce references.
    pub reference_actions: Option<Vec<String>>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            name: default_parser(),
            header_pattern: None,
            header_correspondence: None,
            revert_pattern: None,
            revert_correspondence: None,
            note_keywords: None,
            issue_prefixes: None,
            reference_actions: None,
        }
    }
}

fn default_parser() -> String {
    "conventional".to_string()
}

/// Transform configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformPluginConfig {
    /// Transform plugin name.
    #[serde(default = "default_transform")]
    pub name: String,
}

impl Default for TransformPluginConfig {
    fn default() -> Self {
        Self {
            name: default_transform(),
        }
    }
}

fn default_transform() -> String {
    "jira".to_string()
}

/// Formatter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatterPluginConfig {
    /// Formatter plugin name.
    #[serde(default = "default_formatter")]
    pub name: String,
}

impl Default for FormatterPluginConfig {
    fn default() -> Self {
        Self {
            name: default_formatter(),
        }
    }
}

fn default_formatter() -> String {
    "angular".to_string()
}

/// Package metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Package manifest (npm-style JSON) to read metadata from.
    pub manifest: Option<String>,

    /// Package name.
    pub name: Option<String>,

    /// Issue tracker base URL; overrides the manifest's `bugs.url`.
    pub bugs_url: Option<String>,

    /// Repository URL; overrides the manifest's `repository`.
    pub repository_url: Option<String>,
}

/// Changelog output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Output file path.
    #[serde(default = "default_changelog_output")]
    pub output: String,

    /// Show short commit hashes.
    #[serde(default = "default_true")]
    pub include_hashes: bool,

    /// Show issue references after each commit.
    #[serde(default = "default_true")]
    pub include_references: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            output: default_changelog_output(),
            include_hashes: true,
            include_references: true,
        }
    }
}

fn default_changelog_output() -> String {
    "CHANGELOG.md".to_string()
}

fn default_true() -> bool {
    true
}
