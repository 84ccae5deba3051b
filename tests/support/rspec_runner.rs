//! Runs `rspec` suites one example at a time.

use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};
use std::sync::Arc;

/// Runs `suite` serially so Bevy apps shared through the environment are
/// only ever touched from one thread. A failing example exits the test
/// binary with a non-zero status.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    Runner::new(config, vec![logger]).run(suite);
}
