//! Grouping plan for one directory.
//!
//! A plan is computed once and then either printed (scan) or executed
//! (organize). It is fully determined by the file list, the rules and the
//! threshold, so a retry after a failed move can reuse it as-is.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::cli::SelectArgs;
use crate::core::cluster::{ClusterStrategy, GreedyAnchorClustering};
use crate::core::rules::Rules;
use crate::infra::config::Config;
use crate::infra::walk::FileWalker;

/// One folder to create and the files that go into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub folder: String,
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    pub root: PathBuf,
    pub threshold: f64,
    pub strategy: &'static str,
    pub total_files: usize,
    pub groups: Vec<Group>,
}

impl Plan {
    /// Files that belong to some group.
    pub fn files_to_organize(&self) -> usize {
        self.groups.iter().map(|g| g.files.len()).sum()
    }

    /// Files left where they are.
    pub fn orphaned(&self) -> usize {
        self.total_files - self.files_to_organize()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group `files` (all directly under `root`) and name each group.
pub fn build_plan<C: ClusterStrategy + ?Sized>(
    rules: &Rules,
    strategy: &C,
    root: &Path,
    files: Vec<PathBuf>,
    threshold: f64,
) -> Result<Plan> {
    let names: Vec<String> = files
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let indices = strategy
        .group(rules, &name_refs, threshold)
        .context("Failed to cluster files")?;

    let mut groups = Vec::with_capacity(indices.len());
    for members in indices {
        let member_names: Vec<&str> = members.iter().map(|&i| name_refs[i]).collect();
        let folder = rules
            .folder_name(&member_names)
            .context("Failed to name group")?;
        debug!(folder = %folder, size = members.len(), "group");

        groups.push(Group {
            folder,
            files: members.iter().map(|&i| files[i].clone()).collect(),
        });
    }

    Ok(Plan {
        root: root.to_path_buf(),
        threshold,
        strategy: strategy.name(),
        total_files: files.len(),
        groups,
    })
}

/// Resolve the directory, list and filter its files, and build the plan.
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn plan_directory(config: &Config, rules: &Rules, args: &SelectArgs) -> Result<Plan> {
    let threshold = config.organize.resolve_threshold(args.threshold)?;
    let root = resolve_root(&args.path)?;

    let mut ignore_patterns = config.ignore_patterns.clone();
    ignore_patterns.extend(args.ignore.iter().cloned());

    let walker = FileWalker::new(&ignore_patterns)?
        .with_include_hidden(config.organize.include_hidden)
        .with_follow_symlinks(config.organize.follow_symlinks)
        .with_respect_ignore_files(config.organize.respect_ignore_files);
    let mut files = walker.list_files(&root)?;

    if config.organize.exclude_system_files && !args.all {
        let before = files.len();
        files.retain(|p| !config.organize.is_excluded(p));
        debug!(excluded = before - files.len(), "dropped system files");
    }

    build_plan(rules, &GreedyAnchorClustering, &root, files, threshold)
}

/// Expand `~`/`$VAR` and canonicalize, keeping Windows paths free of `\\?\`.
fn resolve_root(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path '{raw}'"))?;
    let expanded = PathBuf::from(expanded.as_ref());

    if !expanded.exists() {
        anyhow::bail!("Directory '{}' does not exist", expanded.display());
    }
    if !expanded.is_dir() {
        anyhow::bail!("'{}' is not a directory", expanded.display());
    }

    dunce::canonicalize(&expanded)
        .with_context(|| format!("Failed to resolve '{}'", expanded.display()))
}
