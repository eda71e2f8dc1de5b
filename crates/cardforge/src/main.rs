mod cli;
mod commands;
mod context;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(args, cli.verbose, cli.debug),
        Commands::Doctor { json } => commands::doctor::run(json, cli.verbose, cli.debug),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
