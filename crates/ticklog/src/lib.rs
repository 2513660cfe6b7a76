//! Angular-style changelog preset with issue tracker links.
//!
//! A [`Preset`] bundles the conventional commit parser, the tracker-aware
//! commit transform, the grouping policy and the Markdown formatter:
//!
//! ```no_run
//! use ticklog::{Preset, RawCommit, ReleaseInfo};
//!
//! # fn main() -> Result<(), ticklog::CoreError> {
//! let preset = Preset::discover()?;
//! let commits = vec![RawCommit::from_message("4f2a9c1", "feat(api): add search\n\nRefs PROJ-7")];
//! let section = preset.changelog(&commits, &ReleaseInfo::new("1.1.0"))?;
//! print!("{section}");
//! # Ok(())
//! # }
//! ```

mod preset;

pub use preset::Preset;

pub use ticklog_commit::{
    Note, ParsedCommit, RawCommit, Reference, Revert, TransformedCommit,
};
pub use ticklog_config::{Config, ConfigError, ConfigResult};
pub use ticklog_core::{
    CommitField, CoreError, CoreResult, GroupOrder, GroupingPolicy, NoteField, Pipeline,
    ReleaseInfo,
};
pub use ticklog_plugin::{
    FormatterConfig, PackageData, PluginError, PluginResult, Release, WriterContext,
};
