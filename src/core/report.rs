//! Human-readable preview of a plan.

use owo_colors::{OwoColorize, Stream::Stdout};

use crate::core::plan::Plan;

const SEPARATOR_WIDTH: usize = 60;

/// Render the preview as plain text (no colors).
pub fn render_plan(plan: &Plan) -> String {
    let rule = "=".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("Found {} files in {}\n", plan.total_files, plan.root.display()));
    out.push_str(&format!("Using similarity threshold: {}\n", plan.threshold));
    out.push_str(&rule);
    out.push('\n');

    if plan.is_empty() {
        out.push_str("No similar file groups found. Try lowering the threshold.\n");
        return out;
    }

    out.push_str(&format!("Found {} groups of similar files:\n\n", plan.groups.len()));
    for (i, group) in plan.groups.iter().enumerate() {
        out.push_str(&format!("Group {}: '{}' ({} files)\n", i + 1, group.folder, group.files.len()));
        for file in &group.files {
            let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            out.push_str(&format!("  • {name}\n"));
        }
        out.push('\n');
    }

    out.push_str(&format!("{rule}\nSUMMARY\n{rule}\n"));
    out.push_str(&format!("Total files:              {}\n", plan.total_files));
    out.push_str(&format!("Groups found:             {}\n", plan.groups.len()));
    out.push_str(&format!("Files to organize:        {}\n", plan.files_to_organize()));
    out.push_str(&format!("Orphaned files:           {}\n", plan.orphaned()));
    out.push_str(&rule);
    out.push('\n');

    out
}

/// Print the preview, highlighting group headers when color is allowed.
pub fn print_plan(plan: &Plan) {
    for line in render_plan(plan).lines() {
        if line.starts_with("Group ") {
            println!("{}", line.if_supports_color(Stdout, |t| t.bold()));
        } else if line.starts_with("No similar") {
            println!("{}", line.if_supports_color(Stdout, |t| t.yellow()));
        } else {
            println!("{line}");
        }
    }
}
