// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Switchboard crates.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Identifier of one chatbot conversation session on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generates a fresh random (v4 UUID) session id.
    pub fn generate() -> Self {
        SessionId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a message in one of the conversation threads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Author role of a message in the customer-facing thread.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ChatRole {
    Customer,
    Assistant,
    Agent,
    System,
}

/// Author role of a message in the AI assistant / human agent thread.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AgentAiRole {
    HumanAgent,
    AiAgent,
}

// --- Backend run responses ---

/// One event item returned by the orchestration backend's `run` endpoint.
///
/// Unknown fields are ignored; the backend attaches plenty of bookkeeping
/// that the router has no use for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<RunContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<bool>,
}

/// Content block of a [`RunResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<RunResponsePart>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A single part of a [`RunContent`] block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResponsePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl RunResponse {
    /// Builds a response carrying one text part per entry.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RunResponse {
            content: Some(RunContent {
                parts: Some(
                    texts
                        .into_iter()
                        .map(|t| RunResponsePart {
                            text: Some(t.into()),
                        })
                        .collect(),
                ),
                role: Some("model".to_string()),
            }),
            partial: None,
        }
    }

    /// Iterates over the raw text of every part, skipping parts without text.
    pub fn part_texts(&self) -> impl Iterator<Item = &str> {
        self.content
            .iter()
            .flat_map(|c| c.parts.iter().flatten())
            .filter_map(|p| p.text.as_deref())
    }

    /// Raw text of the first part, if the first part carries text.
    pub fn first_part_text(&self) -> Option<&str> {
        self.content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()
    }
}

// --- Socket push envelope ---

/// Envelope pushed by the backend over the socket channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatbotPayload {
    #[serde(default)]
    pub success: bool,
    /// Arbitrary response body: run responses, a string, or a nested envelope.
    #[serde(default)]
    pub response: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(rename = "sessionId", default)]
    pub session_id: String,
}
