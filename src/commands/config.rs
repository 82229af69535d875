//! Config command - write a default configuration file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crlhide::CrlConfig;

use super::CommandExecutor;

/// Write the default configuration as TOML.
///
/// Both sides must use the same chunk_size: share this file with the
/// recovering side or agree on --chunk-size.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Output path for the configuration file
    #[arg(short, long, default_value = "crlhide.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl CommandExecutor for ConfigCommand {
    fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        CrlConfig::default()
            .save(&self.output)
            .with_context(|| format!("Failed to write config to {}", self.output.display()))?;

        println!("Config written to: {}", self.output.display());
        Ok(())
    }
}
