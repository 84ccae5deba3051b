//! Logger bootstrap for the binary and for tests that want log output.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Environment variable consulted for the log filter before the default.
pub const LOG_ENV: &str = "RUST_LOG";

/// Initializes the global logger.
///
/// When `verbose` is `true`, stride-level debug messages (stale commands,
/// accepted strides, lifecycle transitions) are printed. Otherwise only info
/// level and above are shown. `RUST_LOG` always wins when set.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().filter_or(LOG_ENV, level.to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // `try_init` only fails if a logger was already set; repeated calls from
    // tests are harmless.
    if builder.try_init().is_err() {
        log::trace!("logger already initialised");
    }
}
