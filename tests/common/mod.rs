//! Shared helpers for the integration tests.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Installs a fmt subscriber once per test binary.
///
/// Filtering follows `RUST_LOG`, so `RUST_LOG=dyn_byte_buf=trace cargo test` shows the growth and
/// truncation events.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .with_ansi(false)
            .try_init();
    });
}
