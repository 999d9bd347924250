// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seed context for the human-agent assistant session.
//!
//! When a human agent first asks the assistant something, a new backend
//! session is created and seeded with what the chatbot already knows: the
//! transfer summary, the customer conversation so far, the agent's question,
//! and the id of the chatbot session the customer was talking to.

use serde::{Deserialize, Serialize};
use switchboard_core::{ChatRole, SessionId};

use crate::messages::ChatMessage;

/// Summary used when the chatbot never produced one.
pub const NO_SUMMARY: &str = "No summary provided.";

/// One customer-thread message reduced to what the assistant needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSessionContext {
    pub conversation_summary: String,
    pub conversation_history: Vec<HistoryEntry>,
    pub human_agent_query: String,
    pub previous_chatbot_session: SessionId,
}

impl AgentSessionContext {
    pub fn build(
        summary: Option<&str>,
        thread: &[ChatMessage],
        query: &str,
        chatbot_session: &SessionId,
    ) -> Self {
        let conversation_summary = summary
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(NO_SUMMARY)
            .to_string();

        Self {
            conversation_summary,
            conversation_history: thread
                .iter()
                .map(|m| HistoryEntry {
                    role: m.role,
                    message: m.text.clone(),
                })
                .collect(),
            human_agent_query: query.to_string(),
            previous_chatbot_session: chatbot_session.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use switchboard_core::MessageId;

    fn message(role: ChatRole, text: &str) -> ChatMessage {
        ChatMessage {
            id: MessageId(format!("m-{text}")),
            role,
            author: "x".into(),
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    #[test]
    fn blank_summary_uses_placeholder() {
        let session = SessionId("s-1".into());
        let ctx = AgentSessionContext::build(Some("   "), &[], "q", &session);
        assert_eq!(ctx.conversation_summary, NO_SUMMARY);
        let ctx = AgentSessionContext::build(None, &[], "q", &session);
        assert_eq!(ctx.conversation_summary, NO_SUMMARY);
    }

    #[test]
    fn serializes_camel_case_with_role_names() {
        let thread = vec![
            message(ChatRole::Customer, "lost card"),
            message(ChatRole::Assistant, "sorry to hear"),
        ];
        let ctx = AgentSessionContext::build(
            Some(" card lost "),
            &thread,
            "what next?",
            &SessionId("s-1".into()),
        );
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "conversationSummary": "card lost",
                "conversationHistory": [
                    {"role": "customer", "message": "lost card"},
                    {"role": "assistant", "message": "sorry to hear"}
                ],
                "humanAgentQuery": "what next?",
                "previousChatbotSession": "s-1"
            })
        );
    }
}
