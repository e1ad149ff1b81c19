//! Logger setup for binaries and tests

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system at `info` level unless `RUST_LOG` says otherwise
pub fn init() {
    init_with_level(log::LevelFilter::Info);
}

/// Initialize the logging system, falling back to `level` when `RUST_LOG` is unset
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(level: log::LevelFilter) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}
