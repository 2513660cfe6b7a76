//! Core library for ticklog.
//!
//! This crate wires the plugins together: raw commits are parsed,
//! transformed, grouped by a [`GroupingPolicy`] and handed to the formatter.

mod error;
mod files;
mod grouping;
mod pipeline;
mod release;

pub use error::{CoreError, CoreResult};
pub use files::{prepend_changelog, prepend_section, read_manifest};
pub use grouping::{CommitField, GroupOrder, GroupingPolicy, NoteField};
pub use pipeline::Pipeline;
pub use release::{ReleaseInfo, parse_version};
