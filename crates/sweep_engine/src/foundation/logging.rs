//! Logging utilities
//!
//! The library only emits through the `log` facade. Binaries pick the
//! backend; these helpers wire up `env_logger`, honouring `RUST_LOG`.

pub use log::{debug, error, info, trace, warn};

/// Initialize logging with `default_filter` unless `RUST_LOG` overrides it
pub fn init_with_default(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

/// Initialize logging for tests, ignoring repeated initialization
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
