//! `fup completions`: shell completion scripts for the `fup` binary.
//!
//! Scripts go to stdout with `--stdout`, otherwise into `--out-dir`.
//! Writing a file honors `--dry-run` and `--quiet` like `init` does.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::{fs, io};

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{Shell as CompletionShell, generate, generate_to};
use owo_colors::{OwoColorize, Stream::Stdout};

use crate::cli::{AppContext, Cli, CompletionsArgs, Shell};

const BIN_NAME: &str = "fup";

impl From<Shell> for CompletionShell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => CompletionShell::Bash,
            Shell::Zsh => CompletionShell::Zsh,
            Shell::Fish => CompletionShell::Fish,
            Shell::PowerShell => CompletionShell::PowerShell,
            Shell::Elvish => CompletionShell::Elvish,
        }
    }
}

pub fn run(args: CompletionsArgs, ctx: &AppContext) -> Result<()> {
    let shell: CompletionShell = args.shell.into();

    if args.stdout {
        let stdout = io::stdout();
        return write_script(shell, &mut stdout.lock());
    }

    let dir = args
        .out_dir
        .context("--out-dir is required unless --stdout is set")?;

    match write_into(shell, &dir, ctx)? {
        Some(path) if !ctx.quiet => {
            let line = format!("Wrote {shell} completion to {}", path.display());
            println!("{}", line.if_supports_color(Stdout, |t| t.green()));
        }
        Some(_) => {}
        None if !ctx.quiet => println!("Would write {shell} completion into {}", dir.display()),
        None => {}
    }
    Ok(())
}

/// Stream the completion script for `shell` into `out`.
fn write_script<W: Write>(shell: CompletionShell, out: &mut W) -> Result<()> {
    generate(shell, &mut Cli::command(), BIN_NAME, out);
    out.flush().context("flush completion script")
}

/// Write the script file under `dir`. Returns `None` on a dry run.
fn write_into(shell: CompletionShell, dir: &Path, ctx: &AppContext) -> Result<Option<PathBuf>> {
    if ctx.dry_run {
        return Ok(None);
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = generate_to(shell, &mut Cli::command(), BIN_NAME, dir)
        .with_context(|| format!("Failed to write {shell} completion"))?;
    Ok(Some(path))
}
