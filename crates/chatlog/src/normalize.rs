use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ids::create_object_id;
use crate::models::{
    content::{ContentPart, ImageUrl, MessageContent},
    message::{ChatMessage, Role},
    normalized::{
        Attachment, AttachmentKind, NormalizedContent, NormalizedImageUrl, NormalizedMessage,
        NormalizedPart,
    },
};

pub const DEFAULT_IMAGE_DETAIL: &str = "auto";

/// A URL alone does not tell us the media type, so non-data URLs get this placeholder.
pub const GENERIC_IMAGE_MIME_TYPE: &str = "image/*";

/// Messages in the logging platform's schema plus every attachment pulled out of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Normalized {
    pub messages: Vec<NormalizedMessage>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContent {
    pub content: NormalizedContent,
    pub attachments: Vec<Attachment>,
}

impl ResolvedContent {
    fn text<S: Into<String>>(text: S) -> Self {
        Self {
            content: NormalizedContent::Text(text.into()),
            attachments: Vec::new(),
        }
    }
}

/// Convert provider chat messages into the logging platform's message list.
///
/// Attachments are collected in the order their image parts appear across
/// all messages. This never fails: unknown roles are forwarded and
/// unrecognized content degrades to an empty string.
pub fn normalize(messages: &[ChatMessage]) -> Normalized {
    let mut normalized = Normalized::default();

    for message in messages {
        let ResolvedContent {
            content,
            mut attachments,
        } = resolve_content(message.content.as_ref());

        normalized.messages.push(build_message(message, content));
        normalized.attachments.append(&mut attachments);
    }

    debug!(
        messages = normalized.messages.len(),
        attachments = normalized.attachments.len(),
        "normalized chat messages"
    );

    normalized
}

/// `developer` is the only role that gets renamed.
pub fn resolve_role(role: &Role) -> Role {
    match role {
        Role::Developer => Role::System,
        other => other.clone(),
    }
}

/// Resolve a single message's content, extracting image parts as attachments.
pub fn resolve_content(content: Option<&MessageContent>) -> ResolvedContent {
    match content {
        Some(MessageContent::Text(text)) => ResolvedContent::text(text.as_str()),
        Some(MessageContent::Parts(parts)) => resolve_parts(parts),
        Some(MessageContent::Unsupported(_)) | None => ResolvedContent::text(""),
    }
}

fn resolve_parts(parts: &[ContentPart]) -> ResolvedContent {
    let mut text_buffer = String::new();
    let mut output = Vec::with_capacity(parts.len());
    let mut attachments = Vec::new();

    for part in parts {
        match part {
            ContentPart::Text { text } => {
                text_buffer.push_str(text);
                output.push(NormalizedPart::Text { text: text.clone() });
            }
            ContentPart::ImageUrl { image_url } => {
                attachments.push(image_attachment(&image_url.url));
                output.push(NormalizedPart::ImageUrl {
                    image_url: echo_image_url(image_url),
                });
            }
            // Unknown part kinds are dropped, not rejected.
            ContentPart::Unsupported => {}
        }
    }

    let content = match output.as_slice() {
        [NormalizedPart::Text { .. }] => NormalizedContent::Text(text_buffer),
        _ => NormalizedContent::Parts(output),
    };

    ResolvedContent {
        content,
        attachments,
    }
}

fn build_message(message: &ChatMessage, content: NormalizedContent) -> NormalizedMessage {
    let role = resolve_role(&message.role);

    match role {
        Role::Assistant => {
            // Only plain text is valid assistant content in the logged form.
            let content = match content {
                NormalizedContent::Text(text) => Some(NormalizedContent::Text(text)),
                NormalizedContent::Parts(_) => None,
            };
            let mut normalized = NormalizedMessage::new(role, content);
            if let Some(tool_calls) = &message.tool_calls {
                normalized.tool_calls = Some(tool_calls.clone());
            } else if let Some(function_call) = &message.function_call {
                normalized.function_call = Some(function_call.clone());
            }
            normalized
        }
        Role::Tool => {
            let mut normalized = NormalizedMessage::new(role, Some(content));
            normalized.tool_call_id = message.tool_call_id.clone();
            normalized
        }
        // The legacy `name` on function messages has no field in the logged schema.
        Role::System | Role::Developer | Role::User | Role::Function | Role::Other(_) => {
            NormalizedMessage::new(role, Some(content))
        }
    }
}

fn echo_image_url(image_url: &ImageUrl) -> NormalizedImageUrl {
    NormalizedImageUrl {
        url: image_url.url.clone(),
        detail: image_url
            .detail
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_DETAIL.to_string()),
    }
}

fn image_attachment(url: &str) -> Attachment {
    Attachment {
        id: create_object_id("att"),
        kind: AttachmentKind::Url,
        url: url.to_string(),
        mime_type: mime_type_for(url),
    }
}

/// Data URLs carry their media type (`data:image/png;base64,...`); anything else gets the placeholder.
fn mime_type_for(url: &str) -> String {
    url.strip_prefix("data:")
        .and_then(|rest| rest.split(|c: char| c == ';' || c == ',').next())
        .filter(|mime| !mime.is_empty())
        .unwrap_or(GENERIC_IMAGE_MIME_TYPE)
        .to_string()
}
