//! Process-wide logger setup for binaries built on this crate

use std::sync::Once;

use env_logger::Builder;
use log::{LevelFilter, debug};

/// Guards the one-time logger initialisation
static INIT: Once = Once::new();

/// Installs an `env_logger` at `Info`, overridable through `RUST_LOG`.
///
/// Safe to call more than once; only the first call has an effect.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("chainmap", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        if builder.try_init().is_err() {
            debug!("logger already installed elsewhere");
        }
    });
}

#[cfg(test)]
mod tests {
    use log::{debug, info};

    use super::*;

    #[test]
    fn test_logging_levels() {
        initialize_logger();
        initialize_logger();
        debug!("Debug message in test");
        info!("Info message in test");
    }
}
