use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{BufRead, Write};

use crate::options::schema::FIELDS;
use crate::options::ProjectOptions;

/// Ask for every field in schema order. An empty answer keeps the current value,
/// an unparseable one asks again.
pub fn prompt_options(
    options: &mut ProjectOptions,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    for spec in FIELDS {
        loop {
            let current = options.value(spec.name).unwrap_or_default();
            writeln!(output, "{} {}", spec.label.bold(), spec.help.dimmed())?;
            write!(output, "  [{}]: ", current)?;
            output.flush()?;

            let mut answer = String::new();
            let read = input
                .read_line(&mut answer)
                .context("Failed to read answer")?;
            let answer = answer.trim();
            // EOF keeps whatever is left at its current value
            if read == 0 || answer.is_empty() {
                break;
            }

            match options.set(spec.name, answer) {
                Ok(()) => break,
                Err(e) => writeln!(output, "  {} {}", "✗".red(), e)?,
            }
        }
    }
    Ok(())
}
