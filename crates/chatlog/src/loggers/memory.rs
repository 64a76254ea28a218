use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::base::EventSink;
use crate::completion::CompletionEvent;
use crate::errors::LoggerResult;

/// Keeps every recorded event in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<CompletionEvent>>>,
    flushes: Arc<AtomicUsize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CompletionEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn record_completion(&self, event: &CompletionEvent) -> LoggerResult<()> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }

    async fn flush(&self) -> LoggerResult<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionRequest, CompletionResponse};
    use crate::models::message::ChatMessage;
    use anyhow::Result;
    use chrono::Utc;

    fn event() -> CompletionEvent {
        let request = CompletionRequest::new("gpt-4o", vec![ChatMessage::user("hi")]);
        let response = CompletionResponse {
            id: "chatcmpl-1".to_string(),
            model: None,
            created: None,
            choices: vec![],
            usage: None,
        };
        let now = Utc::now();
        CompletionEvent::from_exchange(&request, &response, now, now)
    }

    #[tokio::test]
    async fn test_records_in_order_and_shares_buffer() -> Result<()> {
        let sink = MemorySink::new();
        let handle = sink.clone();
        assert!(handle.is_empty());

        let first = event();
        let second = event();
        sink.record_completion(&first).await?;
        sink.record_completion(&second).await?;

        let events = handle.events();
        assert_eq!(handle.len(), 2);
        assert_eq!(events[0].id, first.id);
        assert_eq!(events[1].id, second.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_flush_is_counted() -> Result<()> {
        let sink = MemorySink::new();
        sink.flush().await?;
        sink.flush().await?;
        assert_eq!(sink.flush_count(), 2);
        Ok(())
    }
}
