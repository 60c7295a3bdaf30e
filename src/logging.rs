//! Diagnostic logging setup.
//!
//! Library code logs through `tracing`; the binary installs a stderr
//! subscriber here so stdout stays clean for `lockbox get`.

use tracing_subscriber::{filter::EnvFilter, fmt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or
/// debug output for this crate when `verbose` is on.
pub fn init(verbose: bool) {
    let fallback = if verbose { "warn,lockbox=debug" } else { "warn" };

    // A second call (e.g. from tests) is harmless, so the error is dropped.
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
