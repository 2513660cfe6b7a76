//! Repository URL normalization.

/// Turns a repository URL as found in package manifests into the browsable
/// `https` form used for compare and commit links.
///
/// A leading `git+` and a trailing `.git` are dropped, and SSH shorthand
/// (`git@host:owner/repo`) and `git://` / `ssh://git@` URLs are rewritten
/// to `https://host/owner/repo`. Trailing slashes are removed.
#[must_use]
pub fn normalize_repository_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);

    let url = if let Some((host, path)) = url
        .strip_prefix("git@")
        .and_then(|rest| rest.split_once(':'))
    {
        format!("https://{host}/{path}")
    } else if let Some(rest) = url
        .strip_prefix("ssh://git@")
        .or_else(|| url.strip_prefix("git://"))
    {
        format!("https://{rest}")
    } else {
        url.to_string()
    };

    let url = url.trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url);
    url.trim_end_matches('/').to_string()
}
