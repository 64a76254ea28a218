use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use chatlog::completion::{CompletionEvent, CompletionRequest, CompletionResponse};
use chatlog::loggers::{registry::LoggerRegistry, trace::TracingSink};

use super::normalize::read_json;

pub async fn execute(
    request_path: &Path,
    response_path: &Path,
    name: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let request: CompletionRequest = read_json(request_path)?;
    let response: CompletionResponse = read_json(response_path)?;
    let event = build_event(&request, &response, name, Utc::now());

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&event)?);
        return Ok(());
    }

    let mut registry = LoggerRegistry::new();
    let logger = registry
        .init_from_env(Arc::new(TracingSink::new()))
        .context("Set CHATLOG_API_KEY and CHATLOG_PROJECT, or pass --dry-run")?;

    let event_id = event.id.clone();
    logger.record_completion(event).await?;
    info!(event_id = %event_id, "recorded completion");

    registry.shutdown().await?;
    Ok(())
}

/// The response's `created` timestamp marks the start when present.
pub fn build_event(
    request: &CompletionRequest,
    response: &CompletionResponse,
    name: Option<String>,
    now: DateTime<Utc>,
) -> CompletionEvent {
    let started_at = response
        .created
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .filter(|started| *started <= now)
        .unwrap_or(now);

    let event = CompletionEvent::from_exchange(request, response, started_at, now);
    match name {
        Some(name) => event.with_name(name),
        None => event,
    }
}
