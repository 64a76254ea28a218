use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

use super::base::EventSink;
use super::configs::LoggerConfig;
use crate::completion::{CompletionEvent, CompletionRequest, CompletionResponse};
use crate::errors::LoggerResult;

/// Client for the logging platform. Share it as `Arc<Logger>` and pass it to call sites.
pub struct Logger {
    config: LoggerConfig,
    sink: Arc<dyn EventSink>,
}

impl Logger {
    pub fn new(config: LoggerConfig, sink: Arc<dyn EventSink>) -> Self {
        Self { config, sink }
    }

    /// Fails with a missing-configuration error when a required variable is absent.
    pub fn from_env(sink: Arc<dyn EventSink>) -> LoggerResult<Self> {
        let config = LoggerConfig::from_env()?;
        Ok(Self::new(config, sink))
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Record an event, filling in the configured project if the event has none.
    pub async fn record_completion(&self, mut event: CompletionEvent) -> LoggerResult<()> {
        if event.project.is_none() {
            event.project = Some(self.config.project.clone());
        }
        self.sink.record_completion(&event).await
    }

    /// Build an event for a finished completion and record it. Returns the event id.
    pub async fn log_completion(
        &self,
        request: &CompletionRequest,
        response: &CompletionResponse,
        started_at: DateTime<Utc>,
    ) -> LoggerResult<String> {
        let event = CompletionEvent::from_exchange(request, response, started_at, Utc::now());
        let id = event.id.clone();
        self.record_completion(event).await?;
        Ok(id)
    }

    /// Like `log_completion`, but a logging failure is only reported, never returned.
    pub async fn observe(
        &self,
        request: &CompletionRequest,
        response: &CompletionResponse,
        started_at: DateTime<Utc>,
    ) -> Option<String> {
        match self.log_completion(request, response, started_at).await {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(error = %err, model = %request.model, "failed to record completion");
                None
            }
        }
    }

    pub async fn shutdown(&self) -> LoggerResult<()> {
        self.sink.flush().await
    }
}
