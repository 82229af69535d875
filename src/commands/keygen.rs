//! Key generation command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crlhide::crypto::{private_key_path, public_key_path};
use crlhide::IssuerKeyPair;

use super::CommandExecutor;

/// Generate an Ed25519 issuer key pair for signing CRLs.
#[derive(Args, Debug)]
pub struct KeygenCommand {
    /// Output base path for keys (creates .sign.pub and .sign.key files)
    #[arg(short, long, default_value = "crlhide")]
    pub output: PathBuf,
}

impl CommandExecutor for KeygenCommand {
    fn execute(&self) -> Result<()> {
        let keypair = IssuerKeyPair::generate();
        keypair
            .save_to_files(&self.output)
            .context("Failed to save issuer key pair")?;

        println!("Generated issuer key pair:");
        println!("  Public key:  {}", public_key_path(&self.output).display());
        println!("  Private key: {}", private_key_path(&self.output).display());
        println!();
        println!("Share the public key with whoever recovers the payload (recover --verify).");

        Ok(())
    }
}
