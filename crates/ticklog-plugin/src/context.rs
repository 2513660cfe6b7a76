//! Context shared with transformers and formatters.

use serde::{Deserialize, Serialize};

/// Read-only context handed to every transform call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterContext {
    /// Metadata of the package the changelog is written for.
    #[serde(default, rename = "packageData")]
    pub package_data: PackageData,
}

impl WriterContext {
    /// Creates a context for the given package.
    #[must_use]
    pub fn new(package_data: PackageData) -> Self {
        Self { package_data }
    }

    /// Returns the issue tracker base URL, if one is configured and non-empty.
    #[must_use]
    pub fn issue_url(&self) -> Option<&str> {
        self.package_data
            .bugs
            .as_ref()
            .and_then(|bugs| bugs.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// Package manifest fields the preset reads.
///
/// Deserializes from an npm-style manifest, where `bugs` and `repository`
/// are either a plain string or an object with a `url` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageData {
    /// Package name.
    #[serde(default)]
    pub name: Option<String>,

    /// Package version.
    #[serde(default)]
    pub version: Option<String>,

    /// Issue tracker.
    #[serde(default)]
    pub bugs: Option<Bugs>,

    /// Source repository URL.
    #[serde(default, deserialize_with = "url_or_object")]
    pub repository: Option<String>,
}

impl PackageData {
    /// Sets the issue tracker base URL.
    #[must_use]
    pub fn with_bugs_url(mut self, url: impl Into<String>) -> Self {
        self.bugs = Some(Bugs {
            url: Some(url.into()),
            email: None,
        });
        self
    }
}

/// Issue tracker location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BugsRepr")]
pub struct Bugs {
    /// Base URL that issue identifiers are appended to.
    pub url: Option<String>,

    /// Contact address for bug reports.
    pub email: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BugsRepr {
    Url(String),
    Object {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        email: Option<String>,
    },
}

impl From<BugsRepr> for Bugs {
    fn from(repr: BugsRepr) -> Self {
        match repr {
            BugsRepr::Url(url) => Self {
                url: Some(url),
                email: None,
            },
            BugsRepr::Object { url, email } => Self { url, email },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UrlRepr {
    Url(String),
    Object { url: String },
}

fn url_or_object<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let repr = Option::<UrlRepr>::deserialize(deserializer)?;
    Ok(repr.map(|repr| match repr {
        UrlRepr::Url(url) | UrlRepr::Object { url } => url,
    }))
}
