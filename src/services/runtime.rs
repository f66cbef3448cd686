//! Tokio Runtime Bridge
//!
//! The binary entry point is synchronous; page loads and debounced searches
//! run on one shared multi-thread tokio runtime.
//!
//! ## Pattern
//!
//! ```text
//! main()
//!   │
//!   ▼
//! block_on(async { controller.refresh().await })
//!   │
//!   ▼
//! tokio::Runtime (reqwest I/O, debounce timers)
//! ```

use std::future::Future;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

use crate::error::Result;

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> Result<&'static Runtime> {
    if let Some(runtime) = TOKIO_RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = Builder::new_multi_thread()
        .thread_name("rm-dashboard-io")
        .enable_all()
        .build()?;
    Ok(TOKIO_RUNTIME.get_or_init(|| runtime))
}

/// Block on a future synchronously (entry point only)
///
/// **Warning**: This blocks the current thread and must not be called from
/// inside the runtime.
pub fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    Ok(get_runtime()?.block_on(future))
}

/// Spawn a detached task with a name (for debugging)
pub fn spawn_named_in_tokio<F>(name: &'static str, future: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    get_runtime()?.spawn(async move {
        future.await;
        tracing::debug!("Tokio task completed: {}", name);
    });
    Ok(())
}
