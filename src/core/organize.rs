//! Executing a plan: create folders, move files, count failures.
//!
//! Each group's folder is created under the plan root. If a non-directory
//! entry already owns that name, `name_1`, `name_2`, ... are tried. Files
//! that collide inside the target folder become `stem_1.ext`, `stem_2.ext`,
//! and so on. A failed move is logged and counted; the rest still run.

use std::ffi::OsString;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream::Stdout};
use tracing::{error, info, instrument, warn};

use crate::cli::{AppContext, OrganizeArgs};
use crate::core::plan::{Plan, plan_directory};
use crate::core::report::print_plan;
use crate::core::rules::Rules;
use crate::infra::config::load_config;

/// Outcome of executing a plan.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OrganizeReport {
    pub moved: usize,
    pub errors: usize,
    pub folders: Vec<PathBuf>,
}

impl OrganizeReport {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

pub fn run(args: OrganizeArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config()?;
    let rules = Rules::compile(&config.rules).context("Invalid [rules] configuration")?;
    let plan = plan_directory(&config, &rules, &args.select)?;

    if !ctx.quiet {
        print_plan(&plan);
    }

    if plan.is_empty() {
        return Ok(());
    }

    if ctx.dry_run {
        if !ctx.quiet {
            println!("{}", "DRY RUN: no files were moved.".if_supports_color(Stdout, |t| t.yellow()));
        }
        return Ok(());
    }

    if !args.yes {
        let stdin = io::stdin();
        if !confirm(&mut stdin.lock(), "Proceed with organizing files? (yes/no): ")? {
            if !ctx.quiet {
                println!("Cancelled.");
            }
            return Ok(());
        }
    }

    let progress = if ctx.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(plan.files_to_organize() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("progress template")?
                .progress_chars("#>-"),
        );
        pb
    };

    let report = execute(&plan, &progress);
    progress.finish_and_clear();

    if !ctx.quiet {
        let line = format!(
            "Successfully organized {} files into {} folders",
            report.moved,
            report.folders.len()
        );
        println!("{}", line.if_supports_color(Stdout, |t| t.green()));
    }

    if !report.is_success() {
        anyhow::bail!("{} file(s) had errors during organization", report.errors);
    }

    Ok(())
}

/// Ask `prompt` and read one answer line; `yes`/`y` (any case) accepts.
pub fn confirm<R: BufRead>(input: &mut R, prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("flush stdout")?;

    let mut answer = String::new();
    input.read_line(&mut answer).context("read confirmation")?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "yes" || answer == "y")
}

/// Create the plan's folders and move every grouped file.
#[instrument(skip_all, fields(root = %plan.root.display(), groups = plan.groups.len()))]
pub fn execute(plan: &Plan, progress: &ProgressBar) -> OrganizeReport {
    let mut report = OrganizeReport::default();

    for group in &plan.groups {
        let target = match prepare_folder(&plan.root, &group.folder) {
            Ok(dir) => dir,
            Err(err) => {
                error!(folder = %group.folder, error = %format!("{err:#}"), "failed to create folder");
                report.errors += 1;
                continue;
            }
        };

        for src in &group.files {
            progress.inc(1);
            match move_into(src, &target) {
                Ok(dst) => {
                    info!(from = %src.display(), to = %dst.display(), "moved");
                    progress.set_message(format!("{}", dst.display()));
                    report.moved += 1;
                }
                Err(err) => {
                    error!(file = %src.display(), error = %format!("{err:#}"), "failed to move");
                    report.errors += 1;
                }
            }
        }

        if !report.folders.contains(&target) {
            report.folders.push(target);
        }
    }

    if report.errors > 0 {
        warn!(errors = report.errors, "organize finished with errors");
    }

    report
}

/// Directory for `folder` under `root`, created if needed.
fn prepare_folder(root: &Path, folder: &str) -> Result<PathBuf> {
    let mut dir = root.join(folder);
    let mut n = 1;
    while dir.exists() && !dir.is_dir() {
        dir = root.join(format!("{folder}_{n}"));
        n += 1;
    }

    fs::create_dir_all(&dir).with_context(|| format!("Failed to create folder {}", dir.display()))?;
    Ok(dir)
}

/// Move `src` into `dir`, renaming on collision. Returns the final path.
fn move_into(src: &Path, dir: &Path) -> Result<PathBuf> {
    let name = src
        .file_name()
        .with_context(|| format!("{} has no file name", src.display()))?;
    let dst = unique_destination(dir, Path::new(name));

    fs::rename(src, &dst)
        .with_context(|| format!("Failed to move {} to {}", src.display(), dst.display()))?;
    Ok(dst)
}

/// First free path in `dir` for `name`: `name`, then `stem_1.ext`, ...
fn unique_destination(dir: &Path, name: &Path) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = name.file_stem().unwrap_or(name.as_os_str()).to_os_string();
    let ext = name.extension().map(|e| e.to_os_string());

    (1..)
        .map(|n| {
            let mut file: OsString = stem.clone();
            file.push(format!("_{n}"));
            if let Some(ext) = &ext {
                file.push(".");
                file.push(ext);
            }
            dir.join(file)
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;
    use crate::core::cluster::GreedyAnchorClustering;
    use crate::core::plan::build_plan;
    use crate::core::rules::RulesConfig;

    fn plan_for(root: &Path, names: &[&str]) -> Plan {
        let rules = Rules::compile(&RulesConfig::default()).unwrap();
        let files = names.iter().map(|n| root.join(n)).collect();
        build_plan(&rules, &GreedyAnchorClustering, root, files, 0.7).unwrap()
    }

    #[test]
    fn moves_groups_into_named_folders() -> Result<()> {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        for n in ["photo_v1.jpg", "photo_v2.jpg", "lonely.txt"] {
            fs::write(root.join(n), n)?;
        }

        let plan = plan_for(root, &["photo_v1.jpg", "photo_v2.jpg", "lonely.txt"]);
        let report = execute(&plan, &ProgressBar::hidden());

        assert_eq!(report, OrganizeReport { moved: 2, errors: 0, folders: vec![root.join("photo")] });
        assert!(root.join("photo/photo_v1.jpg").is_file());
        assert!(root.join("photo/photo_v2.jpg").is_file());
        assert!(root.join("lonely.txt").is_file());
        Ok(())
    }

    #[test]
    fn colliding_files_get_numbered() -> Result<()> {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        fs::create_dir(root.join("report"))?;
        fs::write(root.join("report/report_v1.pdf"), "old")?;
        fs::write(root.join("report/report_v1_1.pdf"), "older")?;
        fs::write(root.join("report_v1.pdf"), "new")?;
        fs::write(root.join("report_v2.pdf"), "v2")?;

        let plan = plan_for(root, &["report_v1.pdf", "report_v2.pdf"]);
        let report = execute(&plan, &ProgressBar::hidden());

        assert_eq!(report.moved, 2);
        assert_eq!(fs::read_to_string(root.join("report/report_v1.pdf"))?, "old");
        assert_eq!(fs::read_to_string(root.join("report/report_v1_2.pdf"))?, "new");
        assert!(root.join("report/report_v2.pdf").is_file());
        Ok(())
    }

    #[test]
    fn file_named_like_the_folder_is_not_clobbered() -> Result<()> {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        fs::write(root.join("notes"), "plain file")?;
        fs::write(root.join("notes_v1.md"), "1")?;
        fs::write(root.join("notes_v2.md"), "2")?;

        let plan = plan_for(root, &["notes_v1.md", "notes_v2.md"]);
        let report = execute(&plan, &ProgressBar::hidden());

        assert!(report.is_success());
        assert_eq!(report.folders, vec![root.join("notes_1")]);
        assert_eq!(fs::read_to_string(root.join("notes"))?, "plain file");
        assert!(root.join("notes_1/notes_v1.md").is_file());
        Ok(())
    }

    #[test]
    fn vanished_file_counts_as_error_and_others_continue() -> Result<()> {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        fs::write(root.join("data_v2.csv"), "2")?;

        let plan = plan_for(root, &["data_v1.csv", "data_v2.csv"]);
        let report = execute(&plan, &ProgressBar::hidden());

        assert_eq!(report.moved, 1);
        assert_eq!(report.errors, 1);
        assert!(!report.is_success());
        assert!(root.join("data/data_v2.csv").is_file());
        Ok(())
    }

    #[test]
    fn confirm_accepts_yes_variants_only() -> Result<()> {
        for (input, expected) in [("yes\n", true), ("Y\n", true), ("  y  \n", true), ("no\n", false), ("\n", false), ("", false)] {
            assert_eq!(confirm(&mut Cursor::new(input), "")?, expected, "{input:?}");
        }
        Ok(())
    }

    #[test]
    fn unique_destination_keeps_dotfiles_whole() -> Result<()> {
        let tmp = TempDir::new()?;
        fs::write(tmp.path().join(".env"), "x")?;
        assert_eq!(unique_destination(tmp.path(), Path::new(".env")), tmp.path().join(".env_1"));
        assert_eq!(unique_destination(tmp.path(), Path::new("free.txt")), tmp.path().join("free.txt"));
        Ok(())
    }
}
