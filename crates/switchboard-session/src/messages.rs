// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Thread message types and message id generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use switchboard_core::{AgentAiRole, ChatRole, MessageId};

/// A message in the customer thread (and its agent-side mirror).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub author: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// A message exchanged between the human agent and the AI assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAiMessage {
    pub id: MessageId,
    pub role: AgentAiRole,
    pub author: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Wall-clock time shown next to the message, 24-hour `HH:MM`.
    pub fn display_time(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

impl AgentAiMessage {
    pub fn display_time(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

/// Which tab of the human-agent panel is showing. At most one at a time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PanelView {
    Summary,
    History,
    AiChat,
}

/// Leading segment of a message id, naming where the message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum IdPrefix {
    User,
    Assistant,
    System,
    AiToHuman,
    HumanToAi,
    AiError,
}

/// Issues `{prefix}-{millis}-{counter}` ids; the counter never repeats
/// within one generator, so ids stay unique even within a millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    counter: u64,
}

impl IdGenerator {
    pub fn next(&mut self, prefix: IdPrefix, at: DateTime<Utc>) -> MessageId {
        self.counter += 1;
        MessageId(format!("{prefix}-{}-{}", at.timestamp_millis(), self.counter))
    }

    /// Number of ids issued so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}
