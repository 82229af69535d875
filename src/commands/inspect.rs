//! Inspect command - summarize a CRL without recovering the payload.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crlhide::inspect;

use super::CommandExecutor;

/// Show the issuer, validity window and record layout of a CRL.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Path to the CRL (DER)
    #[arg(short, long)]
    pub input: PathBuf,
}

impl CommandExecutor for InspectCommand {
    fn execute(&self) -> Result<()> {
        let der = fs::read(&self.input)
            .with_context(|| format!("Failed to read CRL from {}", self.input.display()))?;

        let summary = inspect(&der).context("Failed to parse CRL")?;

        println!("CRL: {}", self.input.display());
        println!("  Issuer:              {}", summary.issuer);
        println!("  This update:         {}", summary.this_update);
        match summary.next_update {
            Some(next) => println!("  Next update:         {}", next),
            None => println!("  Next update:         (none)"),
        }
        println!("  Signature algorithm: {}", summary.signature_algorithm);
        println!("  Revoked entries:     {}", summary.record_count);
        println!("  Entries with digest: {:?}", summary.digest_records);
        println!("  Carried bytes:       {}", summary.carried_bytes);

        Ok(())
    }
}
