//! Commit transformer trait.

use ticklog_commit::{ParsedCommit, TransformedCommit};

use super::Plugin;
use crate::WriterContext;

/// Classifies and enriches parsed commits before they are grouped.
pub trait CommitTransformer: Plugin {
    /// Transforms a single commit.
    ///
    /// Returns `None` when the commit must be left out of the changelog.
    fn transform(&self, commit: ParsedCommit, ctx: &WriterContext) -> Option<TransformedCommit>;
}
