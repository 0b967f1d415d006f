mod fields;
mod new;
mod templates;

use anyhow::Result;
use colored::Colorize;

use crate::cli::{Cli, Command};

/// Execute the CLI command
pub fn execute_command(cli: Cli) -> Result<()> {
    if cli.verbose {
        println!("{} Verbose mode enabled\n", "→".cyan());
    }

    match cli.command {
        Command::New {
            options,
            options_file,
            interactive,
            no_overwrite,
            dry_run,
            open,
            python,
        } => new::execute(
            new::NewArgs {
                options,
                options_file,
                interactive,
                no_overwrite,
                dry_run,
                open,
                python,
            },
            cli.verbose,
        ),
        Command::Fields => fields::execute(),
        Command::Templates => templates::execute(cli.verbose),
    }
}
