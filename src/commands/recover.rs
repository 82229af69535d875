//! Recover command - extract a hidden file from a CRL.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crlhide::crypto::load_verifying_key;
use crlhide::{decode_with_config, read_records, verify_crl_signature, IntegrityStatus};

use super::{resolve_config, CommandExecutor};

/// Recover a file hidden in a CRL.
///
/// The file is always written, even when the digest does not match, so a
/// damaged container can still be examined. Use --strict to make a digest
/// mismatch a failure.
#[derive(Args, Debug)]
pub struct RecoverCommand {
    /// Path to the CRL (DER)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path for the recovered file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Verify the CRL signature with the issuer's public key (.sign.pub)
    #[arg(long)]
    pub verify: Option<PathBuf>,

    /// Chunk size used when hiding (overrides the config file)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip entries with an empty serial number instead of failing
    #[arg(long)]
    pub skip_malformed: bool,

    /// Exit with an error if the digest does not match
    #[arg(long)]
    pub strict: bool,
}

impl CommandExecutor for RecoverCommand {
    fn execute(&self) -> Result<()> {
        let config = resolve_config(self.config.as_deref(), self.chunk_size)?;

        let der = fs::read(&self.input)
            .with_context(|| format!("Failed to read CRL from {}", self.input.display()))?;

        if let Some(pub_path) = &self.verify {
            let verifying_key = load_verifying_key(pub_path)
                .with_context(|| format!("Failed to load public key from {}", pub_path.display()))?;
            verify_crl_signature(&der, &verifying_key).context("CRL signature check failed")?;
            println!("Signature: OK");
        }

        let records = read_records(&der).context("Failed to parse CRL")?;

        let decoded = decode_with_config(&records, &config.decoder_config(self.skip_malformed))
            .context("Failed to recover payload")?;

        fs::write(&self.output, &decoded.data)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        println!("Recovered to: {}", self.output.display());
        println!("  Size:            {} bytes", decoded.data.len());
        println!("  Revoked entries: {}", decoded.records);

        if !decoded.irregular_records.is_empty() {
            println!(
                "  Irregular:       {:?} (chunk size {} may not match the hiding side)",
                decoded.irregular_records, config.chunk_size
            );
        }
        if !decoded.skipped_records.is_empty() {
            println!("  Skipped:         {:?}", decoded.skipped_records);
        }

        match decoded.integrity {
            IntegrityStatus::Valid => println!("  Digest:          OK"),
            IntegrityStatus::Unverified => println!("  Digest:          none present"),
            IntegrityStatus::CheckFailed { record } => {
                println!("  Digest:          MISMATCH at entry {}", record);
                if self.strict {
                    bail!("Integrity check failed: recovered data does not match its digest");
                }
            }
        }

        Ok(())
    }
}
