//! Filepath: src/infra/walk.rs
//! Single-level directory listing for the organizer.
//! - Regular files directly inside the root only (no recursion)
//! - Extra ignore globs matched against file names
//! - Optional hidden file policy and symlink following
//! - `.gitignore`/`.ignore` rules are opt-in; a Downloads folder has none
//! - Deterministic ordering for stable previews and tests
//!
//! Backed by ripgrep's `ignore` crate and `globset`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use tracing::warn;

/// Lists the files an organize pass may move.
pub struct FileWalker
{
    /// Compiled set of additional ignore patterns
    ignore_patterns: GlobSet,

    /// Include hidden (dot) files; default true
    include_hidden: bool,

    /// Treat symlinks to files as files; default true
    follow_symlinks: bool,

    /// Honor .gitignore/.ignore files in the root; default false
    respect_ignore_files: bool,
}

impl FileWalker
{
    /// Build a walker with additional ignore patterns (e.g., "*.part",
    /// "Thumbs.db"). Patterns match on file names.
    pub fn new(additional_ignores: &[String]) -> Result<Self>
    {
        let mut builder = GlobSetBuilder::new();

        for pattern in additional_ignores
        {
            builder.add(
                Glob::new(pattern).with_context(|| format!("Invalid ignore pattern: {pattern}"))?,
            );
        }

        Ok(Self {
            ignore_patterns: builder.build()?,
            include_hidden: true,
            follow_symlinks: true,
            respect_ignore_files: false,
        })
    }

    /// (Optional) Include or exclude hidden files (dotfiles).
    pub fn with_include_hidden(
        mut self,
        include_hidden: bool,
    ) -> Self
    {
        self.include_hidden = include_hidden;
        self
    }

    /// (Optional) Follow or skip symbolic links (default true).
    pub fn with_follow_symlinks(
        mut self,
        follow: bool,
    ) -> Self
    {
        self.follow_symlinks = follow;
        self
    }

    /// (Optional) Honor ignore files found in the root (default false).
    pub fn with_respect_ignore_files(
        mut self,
        respect: bool,
    ) -> Self
    {
        self.respect_ignore_files = respect;
        self
    }

    /// Internal: construct a configured WalkBuilder for `root`.
    fn build_walk(
        &self,
        root: &Path,
    ) -> WalkBuilder
    {
        let mut b = WalkBuilder::new(root);

        // Start from a clean slate, then opt in
        b.standard_filters(false);

        //   WalkBuilder::hidden(true)  => *skip* dotfiles
        b.hidden(!self.include_hidden);

        b.ignore(self.respect_ignore_files);
        b.git_ignore(self.respect_ignore_files);
        b.require_git(false);

        b.follow_links(self.follow_symlinks);
        b.max_depth(Some(1));

        b
    }

    /// Regular files directly under `root`, sorted by path.
    pub fn list_files<P: AsRef<Path>>(
        &self,
        root: P,
    ) -> Result<Vec<PathBuf>>
    {
        let root_path = root.as_ref();
        if !root_path.exists()
        {
            anyhow::bail!("Directory '{}' does not exist", root_path.display());
        }
        if !root_path.is_dir()
        {
            anyhow::bail!("'{}' is not a directory", root_path.display());
        }

        let mut out: Vec<PathBuf> = self
            .build_walk(root_path)
            .build()
            .filter_map(|res| match res
            {
                Ok(entry) => Some(entry),
                Err(err) =>
                {
                    warn!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.depth() == 1)
            .filter(|entry| {
                entry
                    .file_type()
                    .is_some_and(|ft| ft.is_file())
            })
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.file_name()
                    .is_none_or(|name| {
                        !self
                            .ignore_patterns
                            .is_match(name)
                    })
            })
            .collect();

        // Deterministic order (stable CLI & tests)
        out.sort();

        Ok(out)
    }
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn names(paths: &[PathBuf]) -> Vec<String>
    {
        paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| {
                n.to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn lists_top_level_files_only() -> Result<()>
    {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        fs::write(root.join("b.txt"), "b")?;
        fs::write(root.join("a.txt"), "a")?;
        fs::create_dir(root.join("sub"))?;
        fs::write(root.join("sub/nested.txt"), "n")?;

        let files = FileWalker::new(&[])?.list_files(root)?;
        assert_eq!(names(&files), vec!["a.txt", "b.txt"]);
        Ok(())
    }

    #[test]
    fn hidden_policy_and_ignore_globs() -> Result<()>
    {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        fs::write(root.join(".hidden"), "h")?;
        fs::write(root.join("keep.md"), "k")?;
        fs::write(root.join("partial.part"), "p")?;

        let all = FileWalker::new(&["*.part".to_string()])?.list_files(root)?;
        assert_eq!(names(&all), vec![".hidden", "keep.md"]);

        let visible = FileWalker::new(&[])?
            .with_include_hidden(false)
            .list_files(root)?;
        assert_eq!(names(&visible), vec!["keep.md", "partial.part"]);
        Ok(())
    }

    #[test]
    fn gitignore_is_ignored_unless_requested() -> Result<()>
    {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();

        fs::write(root.join(".gitignore"), "*.log\n")?;
        fs::write(root.join("run.log"), "l")?;

        let plain = FileWalker::new(&[])?
            .with_include_hidden(false)
            .list_files(root)?;
        assert_eq!(names(&plain), vec!["run.log"]);

        let respecting = FileWalker::new(&[])?
            .with_include_hidden(false)
            .with_respect_ignore_files(true)
            .list_files(root)?;
        assert!(respecting.is_empty());
        Ok(())
    }

    #[test]
    fn missing_or_file_root_is_an_error() -> Result<()>
    {
        let temp_dir = TempDir::new()?;
        let file = temp_dir
            .path()
            .join("file.txt");
        fs::write(&file, "x")?;

        let walker = FileWalker::new(&[])?;
        assert!(
            walker
                .list_files(temp_dir.path().join("nope"))
                .is_err()
        );
        assert!(
            walker
                .list_files(&file)
                .is_err()
        );
        Ok(())
    }

    #[test]
    fn bad_glob_is_reported()
    {
        assert!(FileWalker::new(&["[".to_string()]).is_err());
    }
}
