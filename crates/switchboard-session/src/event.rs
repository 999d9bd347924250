// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inputs to and observable effects of the conversation state machine.

use serde::{Deserialize, Serialize};
use switchboard_core::{AgentAiRole, ChatRole, ChatbotPayload, MessageId, RunResponse, SessionId};

use crate::context::AgentSessionContext;
use crate::messages::PanelView;

/// Something that happened to the conversation: user input, a backend
/// response, a socket push, or a UI selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// Start over with a new chatbot session; a random id when none is given.
    Reset {
        #[serde(default)]
        session_id: Option<SessionId>,
    },
    /// The customer submitted the composer.
    CustomerMessage { text: String },
    /// The chatbot `run` call returned.
    RunResponses { body: Vec<RunResponse> },
    /// The chatbot `run` call failed.
    RequestFailed,
    /// A payload arrived on the socket channel.
    Socket { payload: ChatbotPayload },
    /// The human agent asked the assistant something.
    HumanAgentMessage { text: String },
    /// The human-agent assistant `run` call returned.
    AgentPanelResponses { body: Vec<RunResponse> },
    /// The human-agent assistant `run` call failed.
    AgentPanelFailed,
    /// Creating the human-agent assistant session failed; the next question
    /// requests a new one.
    AgentSessionFailed,
    /// The human agent picked a panel tab.
    SelectView { view: PanelView },
}

impl ConversationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ConversationEvent::Reset { .. } => "reset",
            ConversationEvent::CustomerMessage { .. } => "customer_message",
            ConversationEvent::RunResponses { .. } => "run_responses",
            ConversationEvent::RequestFailed => "request_failed",
            ConversationEvent::Socket { .. } => "socket",
            ConversationEvent::HumanAgentMessage { .. } => "human_agent_message",
            ConversationEvent::AgentPanelResponses { .. } => "agent_panel_responses",
            ConversationEvent::AgentPanelFailed => "agent_panel_failed",
            ConversationEvent::AgentSessionFailed => "agent_session_failed",
            ConversationEvent::SelectView { .. } => "select_view",
        }
    }
}

/// One observable effect of applying an event, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum StateChange {
    SessionReset {
        session_id: SessionId,
    },
    CustomerThreadAppended {
        id: MessageId,
        role: ChatRole,
    },
    AgentAiThreadAppended {
        id: MessageId,
        role: AgentAiRole,
    },
    /// An assistant message equal to the one directly before it.
    DuplicateDropped {
        text: String,
    },
    /// A raw `to_human_agent` object that reached the customer path.
    EscalationPayloadDropped,
    PanelOpened,
    /// The agent-side copy of the customer thread was refreshed.
    AgentThreadMirrored {
        len: usize,
    },
    ViewChanged {
        view: PanelView,
    },
    SummaryUpdated {
        summary: String,
    },
    /// Body to post to the chatbot `run` endpoint.
    CustomerRequest {
        body: String,
    },
    /// A human-agent assistant session must be created before the first
    /// panel request.
    AgentSessionRequested {
        session_id: SessionId,
        context: AgentSessionContext,
    },
    /// The assistant session was never created and is forgotten.
    AgentSessionDropped {
        session_id: SessionId,
    },
    /// Body to post to the human-agent assistant `run` endpoint.
    AgentPanelRequest {
        session_id: SessionId,
        body: String,
    },
    BusyChanged {
        sending: bool,
        assistant_thinking: bool,
    },
    AgentAiThinkingChanged {
        thinking: bool,
    },
    /// The event had no effect.
    Ignored {
        reason: &'static str,
    },
    SocketFailed {
        error: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_parse_from_tagged_json() {
        let event: ConversationEvent =
            serde_json::from_value(json!({"event": "customer_message", "text": "hi"})).unwrap();
        assert_eq!(
            event,
            ConversationEvent::CustomerMessage { text: "hi".into() }
        );

        let event: ConversationEvent =
            serde_json::from_value(json!({"event": "reset"})).unwrap();
        assert_eq!(event, ConversationEvent::Reset { session_id: None });

        let event: ConversationEvent =
            serde_json::from_value(json!({"event": "select_view", "view": "ai_chat"})).unwrap();
        assert_eq!(event.name(), "select_view");

        let event: ConversationEvent =
            serde_json::from_value(json!({"event": "agent_session_failed"})).unwrap();
        assert_eq!(event, ConversationEvent::AgentSessionFailed);
    }

    #[test]
    fn socket_event_carries_camel_case_payload() {
        let event: ConversationEvent = serde_json::from_value(json!({
            "event": "socket",
            "payload": {"success": true, "response": "hello", "sessionId": "s-1"}
        }))
        .unwrap();
        let ConversationEvent::Socket { payload } = event else {
            panic!("expected socket event");
        };
        assert_eq!(payload.session_id, "s-1");
    }

    #[test]
    fn unknown_event_is_rejected() {
        let result =
            serde_json::from_value::<ConversationEvent>(json!({"event": "teleport"}));
        assert!(result.is_err());
    }

    #[test]
    fn changes_serialize_with_change_tag() {
        let value = serde_json::to_value(StateChange::BusyChanged {
            sending: false,
            assistant_thinking: false,
        })
        .unwrap();
        assert_eq!(
            value,
            json!({"change": "busy_changed", "sending": false, "assistant_thinking": false})
        );
        let value = serde_json::to_value(StateChange::PanelOpened).unwrap();
        assert_eq!(value, json!({"change": "panel_opened"}));
    }
}
