//! crlhide - Hide a file inside a certificate revocation list
//!
//! A CLI tool that stores a payload in the serial numbers of a signed
//! X.509 CRL and recovers it again.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CommandExecutor, ConfigCommand, HideCommand, InspectCommand, KeygenCommand, RecoverCommand,
};

/// crlhide - Hide a file inside a certificate revocation list
///
/// The payload is spread over the serial numbers of the revoked
/// certificates, with a SHA-256 digest on the last entry. Both sides must
/// agree on the chunk size.
#[derive(Parser)]
#[command(name = "crlhide")]
#[command(version)]
#[command(about = "Hide a file inside the revoked-certificate list of a signed CRL")]
#[command(long_about = None)]
struct Cli {
    /// Verbose output (per-record logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an issuer key pair
    Keygen(KeygenCommand),

    /// Hide a file inside a new CRL
    Hide(HideCommand),

    /// Recover a file hidden in a CRL
    Recover(RecoverCommand),

    /// Summarize a CRL
    Inspect(InspectCommand),

    /// Write a default configuration file
    Config(ConfigCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::Keygen(cmd) => cmd,
            Commands::Hide(cmd) => cmd,
            Commands::Recover(cmd) => cmd,
            Commands::Inspect(cmd) => cmd,
            Commands::Config(cmd) => cmd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    crlhide::logging::init_tracing(cli.verbose);

    cli.command.executor().execute()
}
