mod cli;
mod config;
mod handlers;
mod host;
mod logger;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use handlers::{list, repl, run};
use std::env;
use std::process;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    let color = config.console.color && !cli.no_color && env::var_os("NO_COLOR").is_none();
    if !color {
        colored::control::set_override(false);
    }

    match cli.command {
        None => repl::handle_repl(&config, color),
        Some(Commands::Run { lines }) => {
            if !run::handle_run(&lines, &config, color)? {
                process::exit(1);
            }
            Ok(())
        }
        Some(Commands::List) => list::handle_list(),
    }
}
