use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::{self, Command, Stdio};

use crate::cli::OptionArgs;
use crate::notify::ConsoleNotifier;
use crate::options::{
    load_overlay, load_user_defaults, prompt_options, resolve, ProjectOptions,
};
use crate::package::{PackagingOutcome, PackagingSettings};
use crate::template::CATALOG;
use crate::workflow::{self, Settings, Stage};
use crate::writer::{plan, OverwritePolicy};

pub struct NewArgs {
    pub options: OptionArgs,
    pub options_file: Option<PathBuf>,
    pub interactive: bool,
    pub no_overwrite: bool,
    pub dry_run: bool,
    pub open: bool,
    pub python: String,
}

pub fn execute(args: NewArgs, verbose: bool) -> Result<()> {
    let mut options = collect_options(args.options, args.options_file.as_deref(), verbose)?;

    if args.interactive {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        prompt_options(&mut options, &mut stdin.lock(), &mut stdout)?;
        println!();
    }

    if args.dry_run {
        return dry_run(&options);
    }

    let settings = Settings {
        overwrite: if args.no_overwrite {
            OverwritePolicy::Refuse
        } else {
            OverwritePolicy::Overwrite
        },
        packaging: PackagingSettings {
            python: args.python,
        },
    };

    let mut notifier = ConsoleNotifier::new(verbose);
    // Every failure has already been reported through the notifier
    let outcome = match workflow::run(&options, &settings, &mut notifier) {
        Ok(outcome) => outcome,
        Err(_) => process::exit(1),
    };

    if verbose {
        println!("  Wrote {} files", outcome.files.len());
        if let PackagingOutcome::ToolUnavailable { reason } = &outcome.packaging {
            println!("  {}", reason.dimmed());
        }
    }

    if args.open {
        open_directory(&outcome.project_path)?;
    }

    if outcome.stage == Stage::PackagingFailed {
        println!(
            "{} The project was created, the installer was not",
            "⚠".yellow().bold()
        );
    }

    Ok(())
}

/// Defaults, then the user's defaults file, then --options-file, then flags
fn collect_options(
    args: OptionArgs,
    options_file: Option<&Path>,
    verbose: bool,
) -> Result<ProjectOptions> {
    let mut layers = Vec::new();

    if let Some(defaults) = load_user_defaults()? {
        if verbose {
            println!("{} Using user defaults", "→".cyan());
        }
        layers.push(defaults);
    }
    if let Some(path) = options_file {
        if verbose {
            println!("{} Reading options from {}", "→".cyan(), path.display());
        }
        layers.push(load_overlay(path)?);
    }
    layers.push(args.into());

    Ok(resolve(&layers))
}

fn dry_run(options: &ProjectOptions) -> Result<()> {
    let validation = options.validate();
    for warning in &validation.warnings {
        println!("  {} {}", "⚠".yellow(), warning);
    }
    if !validation.is_valid {
        println!("{} Invalid options:", "✗".red().bold());
        for error in &validation.errors {
            println!("  {} {}", "✗".red(), error);
        }
        process::exit(1);
    }

    let files = plan(options, CATALOG)?;
    println!(
        "{} Would write {} files in {}:",
        "→".cyan(),
        files.len(),
        options.source.display().to_string().bright_cyan()
    );
    for file in &files {
        let exists = options.source.join(&file.path).exists();
        println!(
            "  {} {} {}",
            "·".dimmed(),
            file.path.display(),
            if exists {
                "(exists)".yellow().to_string()
            } else {
                format!("({} bytes)", file.body.len()).dimmed().to_string()
            }
        );
    }
    Ok(())
}

fn open_directory(path: &Path) -> Result<()> {
    let candidates: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(target_os = "windows") {
        &["explorer"]
    } else {
        &["xdg-open", "gio"]
    };

    let Some(opener) = candidates.iter().find_map(|c| which::which(c).ok()) else {
        println!(
            "{} No program found to open {}",
            "⚠".yellow().bold(),
            path.display()
        );
        return Ok(());
    };

    let mut command = Command::new(&opener);
    if opener.file_stem().is_some_and(|s| s == "gio") {
        command.arg("open");
    }
    command
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context(format!("Failed to run {}", opener.display()))?;
    Ok(())
}
