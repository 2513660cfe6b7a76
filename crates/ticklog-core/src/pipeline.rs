//! Plugin pipeline execution.

use ticklog_commit::{ParsedCommit, RawCommit, TransformedCommit};
use ticklog_plugin::{
    ChangelogFormatter, CommitParser, CommitTransformer, FormatterConfig, Release, WriterContext,
};
use tracing::{debug, info};

use crate::{CoreResult, GroupingPolicy, ReleaseInfo};

/// Orchestrates plugin execution: parse, transform, group, format.
pub struct Pipeline {
    parser: Box<dyn CommitParser>,
    transformer: Box<dyn CommitTransformer>,
    formatter: Box<dyn ChangelogFormatter>,
    policy: GroupingPolicy,
}

impl Pipeline {
    /// Creates a new pipeline with the given plugins and the default grouping.
    #[must_use]
    pub fn new(
        parser: Box<dyn CommitParser>,
        transformer: Box<dyn CommitTransformer>,
        formatter: Box<dyn ChangelogFormatter>,
    ) -> Self {
        Self {
            parser,
            transformer,
            formatter,
            policy: GroupingPolicy::default(),
        }
    }

    /// Replaces the grouping policy.
    #[must_use]
    pub fn with_policy(mut self, policy: GroupingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parses raw commits using the configured parser.
    pub fn parse_commits(&self, raw_commits: &[RawCommit]) -> Vec<ParsedCommit> {
        raw_commits
            .iter()
            .filter_map(|raw| {
                let parsed = self.parser.parse(raw);
                if parsed.is_none() {
                    debug!(hash = %raw.short_hash(), "skipping unparseable commit");
                }
                parsed
            })
            .collect()
    }

    /// Runs every parsed commit through the transformer, dropping discards.
    pub fn transform_commits(
        &self,
        commits: Vec<ParsedCommit>,
        ctx: &WriterContext,
    ) -> Vec<TransformedCommit> {
        commits
            .into_iter()
            .filter_map(|commit| self.transformer.transform(commit, ctx))
            .collect()
    }

    /// Parses, transforms and groups the commits of one release.
    ///
    /// The repository URL of `info` takes precedence over the package's.
    ///
    /// # Errors
    ///
    /// Returns an error if a version in `info` is not a semantic version.
    pub fn build_release(
        &self,
        raw_commits: &[RawCommit],
        ctx: &WriterContext,
        info: &ReleaseInfo,
    ) -> CoreResult<Release> {
        let mut release = info.to_release()?;
        let package_url = ctx
            .package_data
            .repository
            .as_deref()
            .filter(|url| !url.is_empty());
        if release.repository_url.is_none()
            && let Some(url) = package_url
        {
            release = release.with_repository_url(url);
        }

        let parsed = self.parse_commits(raw_commits);
        let parsed_count = parsed.len();
        let transformed = self.transform_commits(parsed, ctx);

        info!(
            total = raw_commits.len(),
            parsed = parsed_count,
            kept = transformed.len(),
            version = %release.version,
            "processed commits"
        );

        let (commit_groups, note_groups) = self.policy.group(transformed);
        debug!(
            commit_groups = commit_groups.len(),
            note_groups = note_groups.len(),
            "grouped commits"
        );

        Ok(release.with_groups(commit_groups, note_groups))
    }

    /// Builds the release and renders it with the configured formatter.
    ///
    /// # Errors
    ///
    /// Returns an error if a version in `info` is not a semantic version.
    pub fn generate(
        &self,
        raw_commits: &[RawCommit],
        ctx: &WriterContext,
        info: &ReleaseInfo,
        config: &FormatterConfig,
    ) -> CoreResult<String> {
        let release = self.build_release(raw_commits, ctx, info)?;
        let changelog = self.formatter.format(&release, config);
        debug!(
            formatter = self.formatter.name(),
            changelog_len = changelog.len(),
            "generated changelog"
        );
        Ok(changelog)
    }

    /// Returns a reference to the parser.
    pub fn parser(&self) -> &dyn CommitParser {
        self.parser.as_ref()
    }

    /// Returns a reference to the transformer.
    pub fn transformer(&self) -> &dyn CommitTransformer {
        self.transformer.as_ref()
    }

    /// Returns a reference to the formatter.
    pub fn formatter(&self) -> &dyn ChangelogFormatter {
        self.formatter.as_ref()
    }

    /// Returns the grouping policy.
    pub fn policy(&self) -> &GroupingPolicy {
        &self.policy
    }
}
