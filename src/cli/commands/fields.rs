use anyhow::Result;
use colored::Colorize;

use crate::options::{ProjectOptions, FIELDS};

pub fn execute() -> Result<()> {
    let defaults = ProjectOptions::default();

    println!("\n{} Project options:\n", "📋".bold());
    for spec in FIELDS {
        println!(
            "  {} {} {}",
            spec.name.bright_green().bold(),
            format!("({})", spec.kind.as_str()).dimmed(),
            if spec.required { "" } else { "optional" }
        );
        println!("      {}", spec.label);
        println!("      {}", spec.help.dimmed());
        println!(
            "      default: {}",
            defaults.value(spec.name).unwrap_or_default().cyan()
        );
    }
    println!();
    Ok(())
}
