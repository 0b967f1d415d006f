mod cli;
mod notify;
mod options;
mod package;
mod template;
mod workflow;
mod writer;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    if let Err(e) = cli::execute_command(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
