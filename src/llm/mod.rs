//! Chat-completion client abstraction
//!
//! The planner only needs "send these messages, get the reply text back".
//! `AzureChatClient` talks to an Azure OpenAI deployment; tests substitute
//! their own `ChatModel`.

pub mod azure;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

pub use azure::AzureChatClient;

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of a chat-completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A remote model that answers a conversation with text
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send `messages` and return the assistant's reply text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}
