use serde::{ Serialize, Deserialize };
use serde_json::Value as JsonValue;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One conversation turn. Fields are private so a message cannot change after it is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Body the client POSTs to the relay.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub messages: &'a [ChatMessage],
}

/// Body the relay accepts. Entries are forwarded upstream untouched.
#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    pub messages: Vec<JsonValue>,
}

/// Success body returned by the relay. `role` is whatever upstream reported.
#[derive(Clone, Debug, Deserialize)]
pub struct RelayReply {
    #[serde(default)]
    pub role: Option<String>,
    pub content: String,
}

impl RelayReply {
    /// Upstream role is not authoritative: the reply always becomes an assistant turn.
    pub fn into_message(self) -> ChatMessage {
        ChatMessage::assistant(self.content)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
