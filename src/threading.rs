/// Threading and Async Integration Helpers
///
/// Best-effort side tasks: spawned, awaited by nobody in particular, and
/// never able to propagate a failure into the code that spawned them.

use std::fmt::Display;
use std::future::Future;
use tokio::task::JoinHandle;

/// Spawn `fut` on the runtime; an `Err` is logged and becomes `None`
pub fn spawn_best_effort<T, E, Fut>(name: &'static str, fut: Fut) -> JoinHandle<Option<T>>
where
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        match fut.await {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("[Task] {} failed: {}", name, e);
                None
            }
        }
    })
}
