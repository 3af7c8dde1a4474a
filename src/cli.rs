use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vnsh", version, about = "vnsh: Verb-Noun Command Console")]
pub struct Cli {
    /// Config file to use instead of ./vnsh.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Without a subcommand an interactive console starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate each line in order within one session
    #[command(visible_alias = "r")]
    Run {
        #[arg(required = true, allow_hyphen_values = true)]
        lines: Vec<String>,
    },

    /// List all available commands
    #[command(visible_alias = "ls")]
    List,
}
