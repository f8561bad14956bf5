//! Filepath: src/core/rules.rs
//! Immutable grouping rules shared by every stage of the pipeline.
//!
//! `RulesConfig` is the serializable form that lives in `foldup.toml`;
//! `Rules` is the compiled form (regexes built, reserved names folded to
//! upper case). A `Rules` value owns everything the normalizer, scorer,
//! clusterer, namer and sanitizer need, so several independent
//! configurations can coexist in one process.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Version tokens such as `v1`, `_ver2.3.1`, ` v.1.0.0` or a bare `.1.2.0`.
pub const DEFAULT_VERSION_PATTERN: &str = r"[_\s]?(?:(?:v|ver)\.?\d+|\.\d+)(?:\.\d+)?(?:\.\d+)?";

/// Characters rejected in folder names on the strictest platform (Windows).
pub const DEFAULT_INVALID_CHARS: &str = "<>:\"/\\|?*";

/// Folder name used whenever nothing usable survives sanitizing.
pub const DEFAULT_FALLBACK_NAME: &str = "Files";

/// Longest folder name we produce, in characters.
pub const DEFAULT_MAX_NAME_LEN: usize = 200;

/// Smallest group worth reporting.
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;

/// Serializable rule set (the `[rules]` table of the config file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig
{
    /// Regex removed (case-insensitively, globally) after the extension
    pub version_pattern: String,

    /// Status words removed when they stand alone (final, draft, ...)
    pub marker_words: Vec<String>,

    /// Characters replaced with `_` in folder names
    pub invalid_chars: String,

    /// Reserved device names, compared case-insensitively
    pub reserved_names: Vec<String>,

    /// Maximum folder name length in characters
    pub max_name_len: usize,

    /// Folder name used when sanitizing leaves nothing
    pub fallback_name: String,

    /// Minimum members for a group to be reported
    pub min_cluster_size: usize,
}

impl Default for RulesConfig
{
    fn default() -> Self
    {
        let mut reserved: Vec<String> = ["CON", "PRN", "AUX", "NUL"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for port in ["COM", "LPT"]
        {
            reserved.extend((1..=9).map(|n| format!("{port}{n}")));
        }

        Self {
            version_pattern: DEFAULT_VERSION_PATTERN.to_string(),
            marker_words: ["final", "draft", "beta", "alpha", "rc"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            invalid_chars: DEFAULT_INVALID_CHARS.to_string(),
            reserved_names: reserved,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
        }
    }
}

/// Compiled rule set. Cheap to share by reference; holds no mutable state.
#[derive(Debug, Clone)]
pub struct Rules
{
    pub(crate) version: Regex,

    /// `None` when no marker words are configured
    pub(crate) marker: Option<Regex>,

    pub(crate) invalid_chars: Vec<char>,
    pub(crate) reserved_names: HashSet<String>,
    pub(crate) max_name_len: usize,
    pub(crate) fallback_name: String,
    pub(crate) min_cluster_size: usize,
}

impl Rules
{
    /// Validate and compile a rule set.
    pub fn compile(cfg: &RulesConfig) -> Result<Self>
    {
        let version = RegexBuilder::new(&cfg.version_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::Pattern { name: "version_pattern", source })?;

        let marker = Self::marker_regex(&cfg.marker_words)?;

        if cfg.max_name_len == 0
        {
            return Err(Error::InvalidArgument {
                name: "max_name_len",
                message: "must be at least 1".to_string(),
            });
        }

        if cfg.min_cluster_size < 2
        {
            return Err(Error::InvalidArgument {
                name: "min_cluster_size",
                message: format!("must be at least 2, got {}", cfg.min_cluster_size),
            });
        }

        let invalid_chars: Vec<char> = cfg
            .invalid_chars
            .chars()
            .collect();

        let fallback = cfg
            .fallback_name
            .trim_matches([' ', '.']);
        if fallback.is_empty() || fallback.contains(invalid_chars.as_slice())
        {
            return Err(Error::InvalidArgument {
                name: "fallback_name",
                message: format!("{:?} is not a usable folder name", cfg.fallback_name),
            });
        }

        Ok(Self {
            version,
            marker,
            invalid_chars,
            reserved_names: cfg
                .reserved_names
                .iter()
                .map(|n| n.to_uppercase())
                .collect(),
            max_name_len: cfg.max_name_len,
            fallback_name: fallback.to_string(),
            min_cluster_size: cfg.min_cluster_size,
        })
    }

    /// Build the marker matcher.
    ///
    /// The trailing group is the word boundary: end of text, a dot, an
    /// underscore or whitespace. Only the `m` group is removed, so the
    /// boundary character stays available as the next marker's separator.
    fn marker_regex(words: &[String]) -> Result<Option<Regex>>
    {
        let mut words: Vec<&str> = words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty()
        {
            return Ok(None);
        }

        // Longer words first so "rc1" is tried before "rc"
        words.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = format!(r"(?P<m>[_\s]?(?:{alternation}))(?:$|[._\s])");
        RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map(Some)
            .map_err(|source| Error::Pattern { name: "marker_words", source })
    }

    /// Fallback folder name.
    pub fn fallback_name(&self) -> &str
    {
        &self.fallback_name
    }

    /// Smallest reported group size.
    pub fn min_cluster_size(&self) -> usize
    {
        self.min_cluster_size
    }
}
