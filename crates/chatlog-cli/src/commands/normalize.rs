use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

use chatlog::models::message::ChatMessage;
use chatlog::normalize::normalize;

pub fn execute(path: &Path) -> Result<()> {
    let messages = parse_messages(read_json(path)?)?;
    let normalized = normalize(&messages);
    println!("{}", serde_json::to_string_pretty(&normalized)?);
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Accept either a bare message array or a request body carrying `messages`.
pub fn parse_messages(value: Value) -> Result<Vec<ChatMessage>> {
    let messages = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove("messages") {
            Some(messages) => messages,
            None => bail!("Expected an object with a `messages` field"),
        },
        _ => bail!("Expected a JSON array of messages or an object with a `messages` field"),
    };

    serde_json::from_value(messages).context("Messages do not match the chat message format")
}
