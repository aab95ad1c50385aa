//! `scuba-resolve locate` — Show where the configuration file was found.

use std::path::PathBuf;

use clap::Args;
use scuba_config::{DiscoveryOptions, find_config_from};

/// Arguments for the `locate` command.
#[derive(Args, Debug)]
pub struct LocateArgs {
    /// Directory to start searching from (defaults to the working directory).
    #[arg(default_value = ".")]
    pub start: PathBuf,

    /// Keep searching past filesystem boundaries.
    #[arg(long)]
    pub cross_filesystem: bool,
}

/// Executes the `locate` command.
///
/// # Errors
///
/// Returns an error if no configuration file is found.
pub fn execute(config: Option<PathBuf>, args: LocateArgs) -> anyhow::Result<()> {
    if let Some(path) = config {
        println!("{}", path.display());
        return Ok(());
    }

    let mut options = DiscoveryOptions::from_env();
    options.cross_filesystem |= args.cross_filesystem;
    let found = find_config_from(&args.start, options)?;

    println!("{}", found.file().display());
    if !found.relative.as_os_str().is_empty() {
        println!("  working subdirectory: {}", found.relative.display());
    }
    Ok(())
}
