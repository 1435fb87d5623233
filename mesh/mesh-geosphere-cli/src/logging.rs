//! Logger setup.
//!
//! The library reports through `tracing`; with its `log` feature enabled and
//! no subscriber installed, events reach the `log` facade and `env_logger`.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install the global logger once. Later calls are ignored.
///
/// `RUST_LOG` takes precedence; otherwise `verbose` selects `debug` over the
/// default `warn`.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.target(env_logger::Target::Stderr);

        match std::env::var("RUST_LOG") {
            Ok(filter) => builder.parse_filters(&filter),
            Err(_) if verbose => builder.parse_filters("debug"),
            Err(_) => builder.parse_filters("warn"),
        };

        // A logger may already be installed by a test harness
        if builder.try_init().is_ok() {
            tracing::debug!("logging initialized");
        }
    });
}
