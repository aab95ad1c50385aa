//! `scuba-resolve resolve` — Print the execution context for a command.

use std::path::PathBuf;

use clap::Args;

use crate::output;

/// Arguments for the `resolve` command.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Run in this image regardless of the configuration.
    #[arg(long)]
    pub image: Option<String>,

    /// Print the context as JSON.
    #[arg(long)]
    pub json: bool,

    /// Alias or command line to resolve. Empty for an interactive shell.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Executes the `resolve` command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be found or loaded, or if
/// the command line cannot be resolved against it.
pub fn execute(config: Option<PathBuf>, args: ResolveArgs) -> anyhow::Result<()> {
    let config = super::load(config)?;
    let ctx = config.process_command(args.command.as_slice(), args.image.as_deref())?;
    tracing::info!(image = %ctx.image, "resolved command");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ctx)?);
    } else {
        print!("{}", output::format_context(&ctx));
    }
    Ok(())
}
