//! Raw commit type, before parsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit as handed over by the caller, before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// The commit hash (SHA).
    pub hash: String,

    /// The full commit message (header + body + footer).
    pub message: String,

    /// The commit author name.
    pub author: String,

    /// The commit author email.
    pub email: String,

    /// The commit date.
    pub date: DateTime<Utc>,
}

impl RawCommit {
    /// Creates a new raw commit.
    #[must_use]
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        email: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            author: author.into(),
            email: email.into(),
            date,
        }
    }

    /// Creates a raw commit carrying only a hash and a message.
    #[must_use]
    pub fn from_message(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(hash, message, "", "", Utc::now())
    }

    /// Returns the first line of the commit message (the header).
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Returns everything after the header, without surrounding blank lines.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        let (_, rest) = self.message.split_once('\n')?;
        let rest = rest.trim_matches(|c| c == '\n' || c == '\r');
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }

    /// Returns the short hash (first 7 characters).
    #[must_use]
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}
