//! Idempotent tracing setup for tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-writer subscriber once per process.
///
/// Filter precedence is `TEST_LOG`, then `RUST_LOG`, then `warn`. Setting
/// `TEST_LOG_JSON=1` switches to the JSON formatter used in production so
/// field names can be checked by eye.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let json = std::env::var("TEST_LOG_JSON").is_ok_and(|v| v == "1");
        let builder = fmt().with_env_filter(filter).with_test_writer().without_time();
        let _ = if json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    });
}
