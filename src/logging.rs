// src/logging.rs
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "GOMETRICS_LOG";

/// Directive used when `GOMETRICS_LOG` is unset or unparsable.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,ignore=warn",
        2 => "debug,ignore=warn",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `log` records from the engine are picked
/// up through the subscriber's log bridge.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
