//! Tool configuration, stored as TOML.
//!
//! Every field has a default, so a config file only needs the values that
//! differ. `chunk_size` is shared by both directions and must match between
//! the hiding and the recovering side.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::crl::{CrlTemplate, DEFAULT_ISSUER, DEFAULT_NEXT_UPDATE, DEFAULT_THIS_UPDATE};
use crate::decoder::DecoderConfig;
use crate::encoder::EncoderConfig;
use crate::record::{DEFAULT_REVOCATION_TIME, DIGEST_EXTENSION_OID};
use crate::DEFAULT_CHUNK_SIZE;

/// Errors that can occur when loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("Invalid chunk size: {0} (must be greater than zero)")]
    InvalidChunkSize(usize),
}

/// Configuration for hiding and recovering payloads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CrlConfig {
    /// Payload bytes per revoked certificate.
    pub chunk_size: usize,

    /// CRL issuer, as an RFC 4514 string.
    pub issuer: String,

    /// thisUpdate, Unix seconds.
    pub this_update: u64,

    /// nextUpdate, Unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_update: Option<u64>,

    /// Revocation date stamped on every entry, Unix seconds.
    pub revocation_time: u64,

    /// OID of the entry extension holding the digest.
    pub digest_oid: String,

    /// Whether the digest extension is marked critical.
    pub digest_critical: bool,
}

impl Default for CrlConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            issuer: DEFAULT_ISSUER.to_string(),
            this_update: DEFAULT_THIS_UPDATE,
            next_update: Some(DEFAULT_NEXT_UPDATE),
            revocation_time: DEFAULT_REVOCATION_TIME,
            digest_oid: DIGEST_EXTENSION_OID.to_string(),
            digest_critical: true,
        }
    }
}

impl CrlConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: CrlConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }

    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig {
            chunk_size: self.chunk_size,
            revocation_time: self.revocation_time,
            digest_oid: self.digest_oid.clone(),
            digest_critical: self.digest_critical,
        }
    }

    pub fn decoder_config(&self, skip_malformed: bool) -> DecoderConfig {
        DecoderConfig {
            chunk_size: Some(self.chunk_size),
            skip_malformed,
        }
    }

    pub fn template(&self) -> CrlTemplate {
        CrlTemplate {
            issuer: self.issuer.clone(),
            this_update: self.this_update,
            next_update: self.next_update,
        }
    }
}
