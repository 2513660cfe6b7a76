//! Release metadata supplied by the caller.

use chrono::{DateTime, Utc};
use semver::Version;
use ticklog_plugin::Release;

use crate::{CoreError, CoreResult};

/// Parses a version, accepting a leading `v` as used in tags.
///
/// # Errors
///
/// Returns [`CoreError::Version`] if the string is not a semantic version.
pub fn parse_version(input: &str) -> CoreResult<Version> {
    let trimmed = input.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(bare).map_err(|source| CoreError::Version {
        input: input.to_string(),
        source,
    })
}

/// What is being released, as known by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// The new version, e.g. `1.2.0` or `v1.2.0`.
    pub version: String,
    /// The previous version, used for the compare link.
    pub previous_version: Option<String>,
    /// The release date.
    pub date: DateTime<Utc>,
    /// Optional release name.
    pub title: Option<String>,
    /// Repository URL; falls back to the package's repository.
    pub repository_url: Option<String>,
}

impl ReleaseInfo {
    /// Creates release info dated now.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            previous_version: None,
            date: Utc::now(),
            title: None,
            repository_url: None,
        }
    }

    /// Sets the previous version.
    #[must_use]
    pub fn with_previous_version(mut self, version: impl Into<String>) -> Self {
        self.previous_version = Some(version.into());
        self
    }

    /// Sets the release date.
    #[must_use]
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    /// Sets the release name.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the repository URL.
    #[must_use]
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Builds an empty [`Release`] from this info.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Version`] if either version does not parse.
    pub fn to_release(&self) -> CoreResult<Release> {
        let mut release = Release::new(parse_version(&self.version)?, self.date);
        if let Some(previous) = &self.previous_version {
            release = release.with_previous_version(parse_version(previous)?);
        }
        if let Some(title) = &self.title {
            release = release.with_title(title.clone());
        }
        if let Some(url) = self.repository_url.as_deref().filter(|u| !u.is_empty()) {
            release = release.with_repository_url(url);
        }
        Ok(release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_version_plain_and_tagged() {
        assert_eq!(parse_version("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_version("v1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(parse_version(" 2.0.0 ").unwrap(), Version::new(2, 0, 0));
    }

    #[test]
    fn test_parse_version_prerelease() {
        let version = parse_version("1.0.0-beta.1").unwrap();
        assert_eq!(version.pre.as_str(), "beta.1");
    }

    #[test]
    fn test_parse_version_invalid() {
        match parse_version("next") {
            Err(CoreError::Version { input, .. }) => assert_eq!(input, "next"),
            other => panic!("expected Version error, got {other:?}"),
        }
    }

    #[test]
    fn test_to_release() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let info = ReleaseInfo::new("1.1.0")
            .with_previous_version("v1.0.0")
            .with_date(date)
            .with_title("Spring")
            .with_repository_url("https://github.com/acme/widget/");

        let release = info.to_release().unwrap();
        assert_eq!(release.version, Version::new(1, 1, 0));
        assert_eq!(release.previous_version, Some(Version::new(1, 0, 0)));
        assert_eq!(release.date, date);
        assert_eq!(release.title.as_deref(), Some("Spring"));
        assert_eq!(
            release.repository_url.as_deref(),
            Some("https://github.com/acme/widget")
        );
        assert!(release.is_empty());
    }

    #[test]
    fn test_to_release_bad_previous_version() {
        let info = ReleaseInfo::new("1.0.0").with_previous_version("zero");
        assert!(matches!(
            info.to_release(),
            Err(CoreError::Version { .. })
        ));
    }
}
