use anyhow::Result;
use clap::Parser;
use foldup::cli::{AppContext, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
        verbose: cli.verbose,
    };

    foldup::infra::logging::init(ctx.verbose, ctx.no_color);
    if ctx.no_color {
        owo_colors::set_override(false);
    }

    match cli.command {
        Commands::Scan(args) => foldup::scan_run(args, &ctx),
        Commands::Organize(args) => foldup::organize_run(args, &ctx),
        Commands::Init(args) => foldup::infra::config::init(args, &ctx),
        Commands::Completions(args) => foldup::completion::run(args, &ctx),
    }
}
