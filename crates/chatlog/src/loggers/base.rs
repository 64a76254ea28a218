use async_trait::async_trait;

use crate::completion::CompletionEvent;
use crate::errors::LoggerResult;

/// Destination for completion events (a logging backend, an in-memory buffer, ...).
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Hand one event to the backend
    async fn record_completion(&self, event: &CompletionEvent) -> LoggerResult<()>;

    /// Deliver anything still buffered. Called on shutdown.
    async fn flush(&self) -> LoggerResult<()> {
        Ok(())
    }
}
