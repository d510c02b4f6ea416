// crates/test-utils/src/lib.rs

//! Helpers shared by the `jobdag` integration tests.
//!
//! - [`builders`]: ready-made jobs and the benchmark harness graph.
//! - [`recording`]: a [`RunObserver`](jobdag::RunObserver) that keeps events.

pub mod builders;
pub mod recording;

use std::future::Future;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

/// Install a test subscriber once per test binary.
///
/// Reads `JOBDAG_LOG`, then `RUST_LOG`, and defaults to `info`. Output goes
/// through the test writer, so it only shows for failing tests unless run
/// with `--nocapture`.
pub fn init_tracing() {
    let filter = std::env::var("JOBDAG_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    // Every test calls this; only the first call installs a subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .with_target(true)
        .try_init();
}

/// Await `fut`, failing the test after five seconds.
pub async fn with_timeout<F, T>(fut: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), fut)
        .await
        .expect("test timed out after 5 seconds")
}
