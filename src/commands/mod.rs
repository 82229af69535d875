//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod config;
mod hide;
mod inspect;
mod keygen;
mod recover;

pub use config::ConfigCommand;
pub use hide::HideCommand;
pub use inspect::InspectCommand;
pub use keygen::KeygenCommand;
pub use recover::RecoverCommand;

use std::path::Path;

use anyhow::{Context, Result};

use crlhide::CrlConfig;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Loads the config file (or defaults) and applies a `--chunk-size` override.
fn resolve_config(path: Option<&Path>, chunk_size: Option<usize>) -> Result<CrlConfig> {
    let mut config = CrlConfig::load_or_default(path).with_context(|| match path {
        Some(p) => format!("Failed to load config from {}", p.display()),
        None => "Failed to build default config".to_string(),
    })?;

    if let Some(chunk_size) = chunk_size {
        config.chunk_size = chunk_size;
    }
    config.validate().context("Invalid configuration")?;

    Ok(config)
}
