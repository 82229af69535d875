//! Hide command - embed a file into a signed CRL.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crlhide::crypto::load_signing_key;
use crlhide::{encode_with_config, payload_digest, write_crl, IssuerKeyPair};

use super::{resolve_config, CommandExecutor};

/// Hide a file inside the revoked-certificate list of a new CRL.
///
/// The file is split into chunk_size byte pieces, one per revoked
/// certificate serial number. The last entry carries a SHA-256 digest of
/// the file. The recovering side must use the same chunk size.
#[derive(Args, Debug)]
pub struct HideCommand {
    /// File to hide
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path for the CRL (DER)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Issuer private key (.sign.key). A throwaway key is generated if omitted
    #[arg(short, long)]
    pub key: Option<PathBuf>,

    /// Payload bytes per revoked certificate (overrides the config file)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CommandExecutor for HideCommand {
    fn execute(&self) -> Result<()> {
        let config = resolve_config(self.config.as_deref(), self.chunk_size)?;

        let payload = fs::read(&self.input)
            .with_context(|| format!("Failed to read {}", self.input.display()))?;

        let keypair = match &self.key {
            Some(path) => IssuerKeyPair::from_signing_key(
                load_signing_key(path)
                    .with_context(|| format!("Failed to load issuer key from {}", path.display()))?,
            ),
            None => {
                info!("no issuer key given, signing with a throwaway key");
                IssuerKeyPair::generate()
            }
        };

        let records =
            encode_with_config(&payload, &config.encoder_config()).context("Failed to encode payload")?;

        let crl = write_crl(&records, keypair.signing_key(), &config.template())
            .context("Failed to build CRL")?;

        fs::write(&self.output, &crl)
            .with_context(|| format!("Failed to write {}", self.output.display()))?;

        println!("CRL written to: {}", self.output.display());
        println!("  Payload size:    {} bytes", payload.len());
        println!("  Chunk size:      {} bytes", config.chunk_size);
        println!("  Revoked entries: {}", records.len());
        println!("  SHA-256:         {}", hex::encode(payload_digest(&payload)));
        println!("  CRL size:        {} bytes", crl.len());

        Ok(())
    }
}
