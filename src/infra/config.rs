use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::{AppContext, InitArgs};
use crate::core::rules::RulesConfig;

/// Config file names, in priority order
const CONFIG_FILES: [&str; 4] = ["foldup.toml", "foldup.yaml", "foldup.json", ".foldup.toml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Glob patterns skipped when listing a directory (matched on file names)
    pub ignore_patterns: Vec<String>,

    /// Normalization, naming and grouping rules
    pub rules: RulesConfig,

    /// Directory-level policy for scan/organize
    pub organize: OrganizeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizeConfig
{
    /// Threshold used when none is given on the command line
    pub default_threshold: f64,

    /// Lowest threshold an operator may request
    pub min_threshold: f64,

    /// Highest threshold an operator may request
    pub max_threshold: f64,

    /// Extensions (with dot, any case) never organized unless --all
    pub excluded_extensions: Vec<String>,

    /// Apply `excluded_extensions`
    pub exclude_system_files: bool,

    /// Consider dotfiles
    pub include_hidden: bool,

    /// Treat symlinks to files as files
    pub follow_symlinks: bool,

    /// Honor `.gitignore`/`.ignore` files found in the directory
    pub respect_ignore_files: bool,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            ignore_patterns: [".DS_Store", "Thumbs.db", "desktop.ini"]
                .iter()
                .chain(CONFIG_FILES.iter())
                .map(|s| s.to_string())
                .collect(),
            rules: RulesConfig::default(),
            organize: OrganizeConfig::default(),
        }
    }
}

impl Default for OrganizeConfig
{
    fn default() -> Self
    {
        Self {
            default_threshold: 0.7,
            min_threshold: 0.5,
            max_threshold: 0.95,
            excluded_extensions: [".exe", ".dll", ".sys", ".tmp", ".lnk"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_system_files: true,
            include_hidden: true,
            follow_symlinks: true,
            respect_ignore_files: false,
        }
    }
}

impl OrganizeConfig
{
    /// Resolve the effective threshold and enforce the operator band.
    pub fn resolve_threshold(
        &self,
        requested: Option<f64>,
    ) -> Result<f64>
    {
        let threshold = requested.unwrap_or(self.default_threshold);

        if !(self.min_threshold..=self.max_threshold).contains(&threshold)
        {
            anyhow::bail!(
                "Threshold must be between {} and {}, got {}",
                self.min_threshold,
                self.max_threshold,
                threshold
            );
        }

        Ok(threshold)
    }

    /// True if `path` carries one of the excluded extensions.
    pub fn is_excluded(
        &self,
        path: &Path,
    ) -> bool
    {
        let Some(ext) = path
            .extension()
            .and_then(|e| e.to_str())
        else
        {
            return false;
        };

        self.excluded_extensions
            .iter()
            .any(|x| {
                x.trim_start_matches('.')
                    .eq_ignore_ascii_case(ext)
            })
    }
}

/// Load configuration from the current directory.
pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Load configuration from `dir`, falling back to defaults for anything
/// not set. `FOLDUP_`-prefixed environment variables override file values,
/// with `__` separating nested keys (e.g. `FOLDUP_ORGANIZE__DEFAULT_THRESHOLD`).
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    for name in &CONFIG_FILES
    {
        let path = dir.join(name);
        if path.exists()
        {
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("FOLDUP")
            .prefix_separator("_")
            .separator("__"),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join(CONFIG_FILES[0]);

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("Would create config file at {}", config_path.display());
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
