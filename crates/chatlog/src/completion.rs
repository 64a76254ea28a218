use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::create_object_id;
use crate::models::{message::ChatMessage, normalized::Attachment, normalized::NormalizedMessage};
use crate::normalize::normalize;

pub const DEFAULT_EVENT_NAME: &str = "chat-completion";

/// Chat completion request as sent to the provider. Fields we do not log are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// A single string or a list of stop sequences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl CompletionRequest {
    pub fn new<S: Into<String>>(model: S, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            top_p: None,
            stop: None,
            tools: None,
            user: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiUsage {
    #[serde(default)]
    pub prompt_tokens: Option<i32>,
    #[serde(default)]
    pub completion_tokens: Option<i32>,
    #[serde(default)]
    pub total_tokens: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<OpenAiUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

impl From<&OpenAiUsage> for Usage {
    fn from(usage: &OpenAiUsage) -> Self {
        let total_tokens = usage.total_tokens.or_else(|| {
            match (usage.prompt_tokens, usage.completion_tokens) {
                (Some(input), Some(output)) => input.checked_add(output),
                _ => None,
            }
        });

        Usage::new(usage.prompt_tokens, usage.completion_tokens, total_tokens)
    }
}

/// Sampling parameters copied from the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Value>,
}

/// One chat completion in the logging platform's event schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEvent {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    pub model: String,
    pub input: Vec<NormalizedMessage>,
    pub output: Option<NormalizedMessage>,
    pub attachments: Vec<Attachment>,
    pub usage: Usage,
    pub settings: ModelSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Value,
}

impl CompletionEvent {
    /// Build an event from a request and the provider's response.
    ///
    /// Only the first choice is logged as output. Input attachments come
    /// before output attachments.
    pub fn from_exchange(
        request: &CompletionRequest,
        response: &CompletionResponse,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        let input = normalize(&request.messages);
        let mut attachments = input.attachments;

        let choice = response.choices.first();
        let output = choice.and_then(|choice| {
            let mut output = normalize(std::slice::from_ref(&choice.message));
            attachments.append(&mut output.attachments);
            output.messages.into_iter().next()
        });

        let model = response
            .model
            .clone()
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| request.model.clone());

        Self {
            id: create_object_id("evt"),
            name: DEFAULT_EVENT_NAME.to_string(),
            project: None,
            model,
            input: input.messages,
            output,
            attachments,
            usage: response.usage.as_ref().map(Usage::from).unwrap_or_default(),
            settings: ModelSettings {
                temperature: request.temperature,
                max_tokens: request.max_tokens,
                top_p: request.top_p,
                stop: request.stop.clone(),
            },
            finish_reason: choice.and_then(|choice| choice.finish_reason.clone()),
            start_time,
            end_time,
            metadata: Value::Object(Map::new()),
        }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_project<S: Into<String>>(mut self, project: S) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_metadata<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        if !self.metadata.is_object() {
            self.metadata = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.metadata {
            map.insert(key.into(), value);
        }
        self
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }
}
