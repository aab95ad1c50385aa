//! CLI command definitions and dispatch.

pub mod aliases;
pub mod locate;
pub mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use scuba_config::{ScubaConfig, find_config, load_config};

/// Resolve commands against a `.scuba.yml` configuration.
#[derive(Parser, Debug)]
#[command(name = "scuba-resolve", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Use this configuration file instead of searching for one.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the execution context for a command line.
    Resolve(resolve::ResolveArgs),
    /// Show where the configuration file was found.
    Locate(locate::LocateArgs),
    /// List configured aliases and hooks.
    Aliases(aliases::AliasesArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Resolve(args) => resolve::execute(cli.config, args),
        Command::Locate(args) => locate::execute(cli.config, args),
        Command::Aliases(args) => aliases::execute(cli.config, args),
    }
}

/// Loads the configuration from `explicit`, or discovers it from the
/// working directory.
fn load(explicit: Option<PathBuf>) -> anyhow::Result<ScubaConfig> {
    let path = match explicit {
        Some(path) => path,
        None => find_config()?.file(),
    };
    Ok(load_config(&path)?)
}
