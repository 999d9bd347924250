// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for driving a conversation end to end.
//!
//! `TestConversation` owns a [`ConversationState`] and a clock that advances
//! one second per event, and records every [`StateChange`] so tests can
//! assert on both the final threads and what happened along the way.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use switchboard_config::{load_and_validate_str, ConfigError, SwitchboardConfig};
use switchboard_core::SessionId;
use switchboard_session::{ConversationEvent, ConversationState, PanelView, StateChange};

use crate::fixtures::{fixed_time, run_response, socket_payload};

/// Builder for [`TestConversation`].
pub struct TestConversationBuilder {
    session: String,
    config_toml: Option<String>,
}

impl TestConversationBuilder {
    fn new() -> Self {
        Self {
            session: "test-session".to_string(),
            config_toml: None,
        }
    }

    /// Use a specific chatbot session id.
    pub fn with_session(mut self, session: &str) -> Self {
        self.session = session.to_string();
        self
    }

    /// Configure the conversation from TOML instead of defaults.
    pub fn with_config_toml(mut self, toml: &str) -> Self {
        self.config_toml = Some(toml.to_string());
        self
    }

    pub fn build(self) -> Result<TestConversation, Vec<ConfigError>> {
        let config = match &self.config_toml {
            Some(toml) => load_and_validate_str(toml)?,
            None => SwitchboardConfig::default(),
        };
        Ok(TestConversation {
            state: ConversationState::new(SessionId(self.session), &config),
            clock: fixed_time(),
            changes: Vec::new(),
        })
    }
}

/// A conversation under test with a ticking clock and a change log.
pub struct TestConversation {
    pub state: ConversationState,
    clock: DateTime<Utc>,
    changes: Vec<StateChange>,
}

impl TestConversation {
    pub fn builder() -> TestConversationBuilder {
        TestConversationBuilder::new()
    }

    /// Apply an event one second after the previous one.
    pub fn send(&mut self, event: ConversationEvent) -> Vec<StateChange> {
        self.clock += Duration::seconds(1);
        let changes = self.state.apply(event, self.clock);
        self.changes.extend(changes.iter().cloned());
        changes
    }

    pub fn customer_says(&mut self, text: &str) -> Vec<StateChange> {
        self.send(ConversationEvent::CustomerMessage {
            text: text.to_string(),
        })
    }

    /// The chatbot `run` call returned one item with `parts` as text parts.
    pub fn bot_replies(&mut self, parts: &[&str]) -> Vec<StateChange> {
        self.send(ConversationEvent::RunResponses {
            body: vec![run_response(parts)],
        })
    }

    /// A socket push addressed to this conversation's session.
    pub fn socket_push(&mut self, response: Value) -> Vec<StateChange> {
        let payload = socket_payload(self.state.session_id().as_str(), response);
        self.send(ConversationEvent::Socket { payload })
    }

    pub fn agent_asks(&mut self, text: &str) -> Vec<StateChange> {
        self.send(ConversationEvent::HumanAgentMessage {
            text: text.to_string(),
        })
    }

    pub fn assistant_answers(&mut self, parts: &[&str]) -> Vec<StateChange> {
        self.send(ConversationEvent::AgentPanelResponses {
            body: vec![run_response(parts)],
        })
    }

    pub fn select(&mut self, view: PanelView) -> Vec<StateChange> {
        self.send(ConversationEvent::SelectView { view })
    }

    /// Texts of the customer thread, in order.
    pub fn customer_texts(&self) -> Vec<String> {
        self.state
            .customer_thread()
            .iter()
            .map(|m| m.text.clone())
            .collect()
    }

    /// Texts of the human agent / AI assistant thread, in order.
    pub fn agent_ai_texts(&self) -> Vec<String> {
        self.state
            .agent_ai_thread()
            .iter()
            .map(|m| m.text.clone())
            .collect()
    }

    /// Every change recorded since the conversation was built.
    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }
}
