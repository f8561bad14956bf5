use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
    pub verbose: bool,  // global --verbose
}

#[derive(Parser)]
#[command(name = "foldup")]
#[command(about = "Group similarly named files into descriptively named folders")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress bars and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without executing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Emit debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Preview the groups a directory would be organized into
    Scan(ScanArgs),

    /// Move each group of similar files into its own folder
    Organize(OrganizeArgs),

    /// Initialize a foldup.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by `scan` and `organize`
#[derive(Args, Debug, Clone)]
pub struct SelectArgs {
    /// Directory to organize (top level only)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Similarity threshold; defaults to the configured value (0.7)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Include system/executable files normally excluded (.exe, .dll, ...)
    #[arg(long)]
    pub all: bool,

    /// Additional glob patterns to skip (matched on file names)
    #[arg(short, long)]
    pub ignore: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Emit the plan as JSON (single line)
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct OrganizeArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
