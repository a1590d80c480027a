//! Logger setup for binaries and tests.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install an `env_logger` backend once per process
///
/// Defaults to `info`, with the table internals (resizes, tombstone reuse)
/// at `warn`; `RUST_LOG` overrides both.
pub fn init_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("primetable::table", LevelFilter::Warn)
            .format_timestamp_millis()
            .parse_default_env();

        // another logger may already be installed by the host
        let _ = builder.try_init();
    });
}
