//! Plugin system for ticklog.
//!
//! This crate provides the plugin traits and the types passed between them:
//! - [`Plugin`]: Base trait for all plugins
//! - [`CommitParser`]: Splits raw commit messages into structured fields
//! - [`CommitTransformer`]: Classifies and enriches parsed commits
//! - [`ChangelogFormatter`]: Renders grouped commits into a document

mod context;
mod error;
mod repository;
mod traits;

pub use context::{Bugs, PackageData, WriterContext};
pub use error::{PluginError, PluginResult};
pub use repository::normalize_repository_url;
pub use traits::Plugin;
pub use traits::formatter::{
    ChangelogFormatter, CommitGroup, FormatterConfig, NoteEntry, NoteGroup, Release,
};
pub use traits::parser::CommitParser;
pub use traits::transform::CommitTransformer;
