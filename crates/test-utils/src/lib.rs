//! Shared helpers for the `dyncomp` integration tests.

pub mod builders;
pub mod sink;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Upper bound for any single async test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Route `tracing` output into the test harness capture.
///
/// Filter with `RUST_LOG` (default `dyncomp=debug`); the output only shows
/// for failing tests or under `--nocapture`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("dyncomp=debug"));

        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

/// Fail the test if `f` doesn't finish within [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(TEST_TIMEOUT, f)
        .await
        .unwrap_or_else(|_| panic!("test timed out after {TEST_TIMEOUT:?}"))
}
