//! Commit types for ticklog.
//!
//! This crate provides the commit types used throughout ticklog:
//! - [`RawCommit`]: A commit message as handed over by the caller
//! - [`ParsedCommit`]: A commit after the grammar has split it into fields
//! - [`TransformedCommit`]: A display-ready commit produced by a transformer

mod parsed;
mod raw;
mod transformed;

pub use parsed::{Note, ParsedCommit, ParsedCommitBuilder, Reference, Revert};
pub use raw::RawCommit;
pub use transformed::TransformedCommit;
