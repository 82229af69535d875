//! Tracing subscriber setup for the CLI.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug`
/// with `verbose`. Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    let _ = INIT.get_or_init(|| {
        let default_level = if verbose { "debug" } else { "info" };
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(env_filter)
            .try_init();
    });
}
