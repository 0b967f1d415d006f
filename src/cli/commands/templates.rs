use anyhow::Result;
use colored::Colorize;

use crate::template::{placeholders, CATALOG};

pub fn execute(verbose: bool) -> Result<()> {
    println!("\n{} Files in a new project:\n", "📋".bold());
    for template in CATALOG {
        print!("  {} {}", "·".dimmed(), template.path);
        if verbose {
            let mut used = placeholders(template.body);
            used.sort_unstable();
            used.dedup();
            if !used.is_empty() {
                print!(" {}", format!("uses {}", used.join(", ")).dimmed());
            }
        }
        println!();
    }
    println!("\n{} Total: {} files", "✓".green(), CATALOG.len());
    Ok(())
}
