use serde::{Deserialize, Serialize};

use super::message::{FunctionCall, Role, ToolCall};

/// Message content in the logging platform's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedContent {
    Text(String),
    Parts(Vec<NormalizedPart>),
}

impl NormalizedContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            NormalizedContent::Text(text) => Some(text),
            NormalizedContent::Parts(_) => None,
        }
    }
}

impl Default for NormalizedContent {
    fn default() -> Self {
        NormalizedContent::Text(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NormalizedPart {
    Text { text: String },
    ImageUrl { image_url: NormalizedImageUrl },
}

/// Image reference echoed into normalized content. `detail` is always resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedImageUrl {
    pub url: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    pub role: Role,
    /// Always present; `None` only on assistant messages whose content was not plain text.
    #[serde(default)]
    pub content: Option<NormalizedContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl NormalizedMessage {
    pub fn new(role: Role, content: Option<NormalizedContent>) -> Self {
        Self {
            role,
            content,
            tool_call_id: None,
            tool_calls: None,
            function_call: None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().and_then(NormalizedContent::as_text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Url,
}

/// Out-of-band reference to media pulled out of message content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    pub mime_type: String,
}
