mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub use commands::execute_command;

use crate::options::OptionsOverlay;

/// Scaffold a new desktop application project from templates
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project
    New {
        #[command(flatten)]
        options: OptionArgs,

        /// Read options from a YAML file (flags take precedence)
        #[arg(long = "options", value_name = "FILE")]
        options_file: Option<PathBuf>,

        /// Ask for every option on the terminal
        #[arg(short = 'i', long)]
        interactive: bool,

        /// Fail instead of overwriting files that already exist
        #[arg(long)]
        no_overwrite: bool,

        /// Show which files would be written without writing them
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Open the project directory when done
        #[arg(long)]
        open: bool,

        /// Python interpreter used to build the installer
        #[arg(long, default_value = "python")]
        python: String,
    },

    /// List the project options with their defaults
    Fields,

    /// List the files a new project contains
    Templates,
}

/// Project options that can be given on the command line
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// Directory in which to create the project sources
    #[arg(short = 's', long)]
    pub source: Option<PathBuf>,

    /// Application name
    #[arg(long)]
    pub name: Option<String>,

    /// Application author
    #[arg(long)]
    pub author: Option<String>,

    /// Python module containing the application (defaults to the name in snake_case)
    #[arg(short = 'm', long)]
    pub module: Option<String>,

    /// Domain name of the author
    #[arg(long)]
    pub domain: Option<String>,

    /// Website of the application
    #[arg(long)]
    pub application_url: Option<String>,

    /// Online help location
    #[arg(long)]
    pub help_url: Option<String>,

    /// Build a windows installer after creating the project
    #[arg(long, overrides_with = "no_installer")]
    pub installer: bool,

    /// Do not build an installer, even if an options file asks for one
    #[arg(long, overrides_with = "installer")]
    pub no_installer: bool,
}

impl From<OptionArgs> for OptionsOverlay {
    fn from(args: OptionArgs) -> Self {
        OptionsOverlay {
            source: args.source,
            name: args.name,
            author: args.author,
            module: args.module,
            domain: args.domain,
            application_url: args.application_url,
            help_url: args.help_url,
            installer: match (args.installer, args.no_installer) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
        }
    }
}
