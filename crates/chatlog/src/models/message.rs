use serde::{Deserialize, Serialize};
use std::fmt;

use super::content::{ContentPart, MessageContent};

/// Chat roles as sent by the provider.
///
/// Roles outside the known set are kept verbatim in `Other` and forwarded
/// unchanged, so a new provider role never breaks logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    /// Legacy alias for `System`.
    Developer,
    User,
    Assistant,
    Tool,
    Function,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::Developer => "developer",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
            Role::Function => "function",
            Role::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        match role.as_str() {
            "system" => Role::System,
            "developer" => Role::Developer,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "tool" => Role::Tool,
            "function" => Role::Function,
            _ => Role::Other(role),
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Role::from(role.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(role) => role,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "default_tool_call_type")]
    pub kind: String,
    #[serde(default)]
    pub function: FunctionCall,
}

impl ToolCall {
    pub fn function<I, N, A>(id: I, name: N, arguments: A) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        A: Into<String>,
    {
        Self {
            id: id.into(),
            kind: default_tool_call_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

fn default_tool_call_type() -> String {
    "function".to_string()
}

/// A single turn of a provider chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn new<R: Into<Role>>(role: R) -> Self {
        Self {
            role: role.into(),
            content: None,
            name: None,
            tool_calls: None,
            function_call: None,
            tool_call_id: None,
        }
    }

    pub fn system<S: Into<String>>(text: S) -> Self {
        Self::new(Role::System).with_content(MessageContent::text(text))
    }

    pub fn developer<S: Into<String>>(text: S) -> Self {
        Self::new(Role::Developer).with_content(MessageContent::text(text))
    }

    pub fn user<S: Into<String>>(text: S) -> Self {
        Self::new(Role::User).with_content(MessageContent::text(text))
    }

    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Self::new(Role::Assistant).with_content(MessageContent::text(text))
    }

    pub fn tool<I: Into<String>, S: Into<String>>(tool_call_id: I, text: S) -> Self {
        Self::new(Role::Tool)
            .with_content(MessageContent::text(text))
            .with_tool_call_id(tool_call_id)
    }

    pub fn with_content<C: Into<MessageContent>>(mut self, content: C) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_parts(self, parts: Vec<ContentPart>) -> Self {
        self.with_content(parts)
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }

    pub fn with_function_call(mut self, function_call: FunctionCall) -> Self {
        self.function_call = Some(function_call);
        self
    }

    pub fn with_tool_call_id<S: Into<String>>(mut self, tool_call_id: S) -> Self {
        self.tool_call_id = Some(tool_call_id.into());
        self
    }
}
