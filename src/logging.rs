//! Tracing setup driven by CLI verbosity.

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber.
///
/// Verbosity maps 0 to warn, 1 to info, 2 to debug and anything higher to
/// trace. A `RUST_LOG` value in the environment wins over the flag.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ecclimate={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
