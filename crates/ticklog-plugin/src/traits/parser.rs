//! Commit parser trait.

use ticklog_commit::{ParsedCommit, RawCommit};

use super::Plugin;

/// Splits raw commit messages into structured fields.
pub trait CommitParser: Plugin {
    /// Parses a raw commit into a parsed commit.
    ///
    /// Returns `None` if the message cannot be parsed at all. A message whose
    /// header does not follow the grammar still parses, with no type.
    fn parse(&self, raw: &RawCommit) -> Option<ParsedCommit>;

    /// Returns whether this parser can handle the given commit.
    fn can_parse(&self, raw: &RawCommit) -> bool {
        self.parse(raw).is_some()
    }
}
