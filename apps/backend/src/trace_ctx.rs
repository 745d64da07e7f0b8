//! Task-local trace id for the request being served.
//!
//! `RequestTrace` opens the scope; error rendering and log helpers read it so
//! problem-details bodies, the `x-trace-id` header and log lines agree.

use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Current trace id, or `"unknown"` outside a request scope (cron loops
/// spawned off the request task, startup code, tests).
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_outside_scope() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn scoped_value_is_visible_and_restored() {
        let inner = with_trace_id("outer".into(), async {
            assert_eq!(trace_id(), "outer");
            let nested = with_trace_id("inner".into(), async { trace_id() }).await;
            assert_eq!(trace_id(), "outer");
            nested
        })
        .await;
        assert_eq!(inner, "inner");
        assert_eq!(trace_id(), "unknown");
    }
}
