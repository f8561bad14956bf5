//! `fup scan`: compute and show the plan without touching the disk.

use anyhow::{Context, Result};

use crate::cli::{AppContext, ScanArgs};
use crate::core::plan::plan_directory;
use crate::core::report::print_plan;
use crate::core::rules::Rules;
use crate::infra::config::load_config;

pub fn run(args: ScanArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config()?;
    let rules = Rules::compile(&config.rules).context("Invalid [rules] configuration")?;
    let plan = plan_directory(&config, &rules, &args.select)?;

    if args.json {
        println!("{}", serde_json::to_string(&plan).context("serialize plan")?);
        return Ok(());
    }

    if !ctx.quiet {
        print_plan(&plan);
        if !plan.is_empty() {
            println!("This was a preview. No files were moved.");
        }
    }

    Ok(())
}
