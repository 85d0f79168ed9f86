//! Logging initialization
//!
//! Console subscriber with env-filter control. `RUST_LOG` always wins;
//! without it the verbosity flag picks the default level.

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "fare_scout=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
