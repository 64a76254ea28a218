use async_trait::async_trait;

use super::base::EventSink;
use crate::completion::CompletionEvent;
use crate::errors::LoggerResult;

pub const EVENT_TARGET: &str = "chatlog::event";

/// Emits each completion event as a structured `tracing` event carrying the JSON payload.
#[derive(Debug, Clone, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for TracingSink {
    async fn record_completion(&self, event: &CompletionEvent) -> LoggerResult<()> {
        let payload = serde_json::to_string(event)?;
        tracing::info!(
            target: EVENT_TARGET,
            event_id = %event.id,
            name = %event.name,
            project = event.project.as_deref().unwrap_or_default(),
            model = %event.model,
            attachments = event.attachments.len(),
            payload = %payload,
            "completion recorded"
        );
        Ok(())
    }
}
