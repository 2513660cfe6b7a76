//! The changelog preset and its construction from configuration.

use std::path::{Path, PathBuf};

use ticklog_commit::RawCommit;
use ticklog_config::{
    CONFIG_FILE_NAME, ChangelogConfig, Config, ConfigError, PackageConfig, ParserConfig,
    find_config_file, load_config,
};
use ticklog_core::{
    CoreResult, GroupingPolicy, Pipeline, ReleaseInfo, prepend_changelog, read_manifest,
};
use ticklog_formatter_angular::AngularFormatter;
use ticklog_parser_conventional::{ConventionalParser, ParserOptions};
use ticklog_plugin::{
    ChangelogFormatter, CommitParser, CommitTransformer, FormatterConfig, PackageData,
    PluginError, PluginResult, Release, WriterContext,
};
use ticklog_transform_jira::JiraTransform;
use tracing::{debug, info};

/// Parser, transform, grouping policy and formatter bundled with the
/// package context they run against.
pub struct Preset {
    pipeline: Pipeline,
    context: WriterContext,
    formatter_config: FormatterConfig,
    output: PathBuf,
}

impl Preset {
    /// Builds a preset from configuration without touching the filesystem.
    ///
    /// The package context comes from the `[package]` table only; use
    /// [`Preset::load`] to also read the configured manifest.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::NotFound`] for an unknown plugin name, or the
    /// parser's error when the configured grammar is invalid.
    pub fn from_config(config: &Config) -> PluginResult<Self> {
        let parser = create_parser(&config.parser)?;
        let transformer = create_transformer(&config.transform.name)?;
        let formatter = create_formatter(&config.formatter.name)?;
        debug!(
            parser = parser.name(),
            transform = transformer.name(),
            formatter = formatter.name(),
            "building preset"
        );

        Ok(Self {
            pipeline: Pipeline::new(parser, transformer, formatter),
            context: WriterContext::new(apply_package_config(
                &config.package,
                PackageData::default(),
            )),
            formatter_config: FormatterConfig {
                include_hashes: config.changelog.include_hashes,
                include_references: config.changelog.include_references,
            },
            output: PathBuf::from(&config.changelog.output),
        })
    }

    /// Loads the configuration file at `path` and builds a preset from it.
    ///
    /// The manifest and output paths are resolved against the directory of
    /// the configuration file. Values in `[package]` override the manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or manifest cannot be loaded,
    /// or a plugin cannot be built.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let config = load_config(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        let mut preset = Self::from_config(&config)?;
        if let Some(manifest) = &config.package.manifest {
            let data = read_manifest(&base.join(manifest))?;
            preset.context = WriterContext::new(apply_package_config(&config.package, data));
        }
        preset.output = base.join(&config.changelog.output);
        Ok(preset)
    }

    /// Finds the nearest `ticklog.toml` from the current directory upwards
    /// and loads it.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration file is found or it cannot be
    /// loaded.
    pub fn discover() -> CoreResult<Self> {
        let current_dir = std::env::current_dir()?;
        Self::discover_from(current_dir)
    }

    /// Finds the nearest `ticklog.toml` from `start_dir` upwards and loads it.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration file is found or it cannot be
    /// loaded.
    pub fn discover_from(start_dir: impl AsRef<Path>) -> CoreResult<Self> {
        let start_dir = start_dir.as_ref();
        match find_config_file(start_dir) {
            Some(path) => Self::load(path),
            None => Err(ConfigError::NotFound(start_dir.join(CONFIG_FILE_NAME)).into()),
        }
    }

    /// Replaces the package context.
    #[must_use]
    pub fn with_context(mut self, context: WriterContext) -> Self {
        self.context = context;
        self
    }

    /// Replaces the grouping policy.
    #[must_use]
    pub fn with_policy(mut self, policy: GroupingPolicy) -> Self {
        self.pipeline = self.pipeline.with_policy(policy);
        self
    }

    /// Returns the context handed to the transform.
    pub fn context(&self) -> &WriterContext {
        &self.context
    }

    /// Returns the underlying pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Returns the formatter settings.
    pub fn formatter_config(&self) -> &FormatterConfig {
        &self.formatter_config
    }

    /// Returns the changelog file the preset writes to.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Parses, transforms and groups the commits of one release.
    ///
    /// # Errors
    ///
    /// Returns an error if a version in `info` is not a semantic version.
    pub fn release(&self, commits: &[RawCommit], info: &ReleaseInfo) -> CoreResult<Release> {
        self.pipeline.build_release(commits, &self.context, info)
    }

    /// Renders the changelog section for one release.
    ///
    /// # Errors
    ///
    /// Returns an error if a version in `info` is not a semantic version.
    pub fn changelog(&self, commits: &[RawCommit], info: &ReleaseInfo) -> CoreResult<String> {
        self.pipeline
            .generate(commits, &self.context, info, &self.formatter_config)
    }

    /// Renders the release section and prepends it to the output file.
    ///
    /// Returns the new file content; with `dry_run` the file is left as is.
    ///
    /// # Errors
    ///
    /// Returns an error if a version does not parse or the file cannot be
    /// read or written.
    pub fn write_changelog(
        &self,
        commits: &[RawCommit],
        info: &ReleaseInfo,
        dry_run: bool,
    ) -> CoreResult<String> {
        let section = self.changelog(commits, info)?;
        let content = prepend_changelog(&self.output, &section, dry_run)?;
        info!(
            path = %self.output.display(),
            version = %info.version,
            dry_run,
            "changelog updated"
        );
        Ok(content)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            pipeline: Pipeline::new(
                Box::new(ConventionalParser::new()),
                Box::new(JiraTransform::new()),
                Box::new(AngularFormatter::new()),
            ),
            context: WriterContext::default(),
            formatter_config: FormatterConfig::default(),
            output: PathBuf::from(ChangelogConfig::default().output),
        }
    }
}

fn parser_options(config: &ParserConfig) -> ParserOptions {
    let defaults = ParserOptions::default();
    ParserOptions {
        header_pattern: config
            .header_pattern
            .clone()
            .unwrap_or(defaults.header_pattern),
        header_correspondence: config
            .header_correspondence
            .clone()
            .unwrap_or(defaults.header_correspondence),
        revert_pattern: config
            .revert_pattern
            .clone()
            .unwrap_or(defaults.revert_pattern),
        revert_correspondence: config
            .revert_correspondence
            .clone()
            .unwrap_or(defaults.revert_correspondence),
        note_keywords: config
            .note_keywords
            .clone()
            .unwrap_or(defaults.note_keywords),
        issue_prefixes: config
            .issue_prefixes
            .clone()
            .unwrap_or(defaults.issue_prefixes),
        reference_actions: config
            .reference_actions
            .clone()
            .unwrap_or(defaults.reference_actions),
    }
}

fn create_parser(config: &ParserConfig) -> PluginResult<Box<dyn CommitParser>> {
    match config.name.as_str() {
        "conventional" => Ok(Box::new(ConventionalParser::with_options(
            parser_options(config),
        )?)),
        other => Err(PluginError::NotFound(format!("parser `{other}`"))),
    }
}

fn create_transformer(name: &str) -> PluginResult<Box<dyn CommitTransformer>> {
    match name {
        "jira" => Ok(Box::new(JiraTransform::new())),
        other => Err(PluginError::NotFound(format!("transform `{other}`"))),
    }
}

fn create_formatter(name: &str) -> PluginResult<Box<dyn ChangelogFormatter>> {
    match name {
        "angular" => Ok(Box::new(AngularFormatter::new())),
        other => Err(PluginError::NotFound(format!("formatter `{other}`"))),
    }
}

fn apply_package_config(config: &PackageConfig, mut data: PackageData) -> PackageData {
    if let Some(name) = &config.name {
        data.name = Some(name.clone());
    }
    if let Some(url) = &config.bugs_url {
        match &mut data.bugs {
            Some(bugs) => bugs.url = Some(url.clone()),
            None => data = data.with_bugs_url(url.clone()),
        }
    }
    if let Some(url) = &config.repository_url {
        data.repository = Some(url.clone());
    }
    data
}
