//! `scuba-resolve aliases` — List configured aliases and hooks.

use std::path::PathBuf;

use clap::Args;

use crate::output;

/// Arguments for the `aliases` command.
#[derive(Args, Debug)]
pub struct AliasesArgs {
    /// Also list hooks.
    #[arg(long)]
    pub hooks: bool,
}

/// Executes the `aliases` command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be found or loaded.
pub fn execute(config: Option<PathBuf>, args: AliasesArgs) -> anyhow::Result<()> {
    let config = super::load(config)?;

    if config.aliases().is_empty() {
        println!("No aliases defined.");
    }
    for (name, alias) in config.aliases() {
        print!("{}", output::format_alias(name, alias));
    }

    if args.hooks {
        for (name, script) in config.hooks() {
            println!("hook {name}:");
            for line in script {
                println!("    {line}");
            }
        }
    }
    Ok(())
}
