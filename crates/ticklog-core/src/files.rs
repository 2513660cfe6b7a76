//! Changelog and package manifest files.

use std::fs;
use std::path::Path;

use ticklog_plugin::PackageData;
use tracing::debug;

use crate::{CoreError, CoreResult};

/// Reads package metadata from an npm-style JSON manifest.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON object with
/// the expected field types.
pub fn read_manifest(path: &Path) -> CoreResult<PackageData> {
    debug!(?path, "reading package manifest");
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| CoreError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Inserts a rendered release section at the top of a changelog.
///
/// A leading `# ` title line stays first; the new section goes right below
/// it. Blank lines between the section and the existing entries are
/// normalized to one.
#[must_use]
pub fn prepend_section(existing: &str, section: &str) -> String {
    let section = section.trim_end_matches('\n');

    if existing.trim().is_empty() {
        return format!("{section}\n");
    }

    if existing.starts_with("# ") {
        let (title, rest) = existing.split_once('\n').unwrap_or((existing, ""));
        let rest = rest.trim_start_matches('\n');
        if rest.is_empty() {
            return format!("{title}\n\n{section}\n");
        }
        return format!("{title}\n\n{section}\n\n{rest}");
    }

    format!("{section}\n\n{}", existing.trim_start_matches('\n'))
}

/// Prepends a section to the changelog file at `path`.
///
/// A missing file is created. With `dry_run` nothing is written. Returns the
/// new file content either way.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, or cannot be
/// written.
pub fn prepend_changelog(path: &Path, section: &str, dry_run: bool) -> CoreResult<String> {
    let existing = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let content = prepend_section(&existing, section);
    debug!(?path, dry_run, len = content.len(), "updating changelog");

    if !dry_run {
        fs::write(path, &content)?;
    }

    Ok(content)
}
