// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state machine.
//!
//! A [`ConversationState`] owns the three threads of one support
//! conversation: the customer thread, the agent-side mirror of it, and the
//! thread between the human agent and the AI assistant. Every input is a
//! [`ConversationEvent`]; applying one mutates the state and returns the
//! [`StateChange`]s it caused, in order.
//!
//! Flow of a customer turn:
//! `CustomerMessage` (sending) -> `RunResponses` and/or `Socket` (reply
//! routed, flags cleared). Replies are routed in a fixed order: escalations
//! to the agent panel first, then direct messages to the customer, then the
//! latest transfer summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use switchboard_config::model::{DisplayConfig, RoutingConfig, SwitchboardConfig};
use switchboard_core::{AgentAiRole, ChatRole, RunResponse, SessionId};
use switchboard_parser::is_escalation_payload;
use switchboard_reply::{
    extract_panel_reply, extract_reply, format_user_message, interpret_socket_payload,
    AgentReply, ExtractOptions, SocketOutcome, UserType,
};
use tracing::{debug, info, warn};

use crate::context::AgentSessionContext;
use crate::event::{ConversationEvent, StateChange};
use crate::messages::{AgentAiMessage, ChatMessage, IdGenerator, IdPrefix, PanelView};

/// Shown to the customer when the chatbot request fails.
pub const CUSTOMER_APOLOGY: &str =
    "Sorry, I ran into a problem sending that message. Please try again.";

/// Shown to the human agent when the assistant request fails.
pub const AGENT_PANEL_APOLOGY: &str = "Sorry, I could not process that request. Please try again.";

/// Everything the support UI shows for one chatbot session.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationState {
    session_id: SessionId,
    customer_thread: Vec<ChatMessage>,
    /// Copy of the customer thread, kept in sync once the panel is open.
    agent_thread: Vec<ChatMessage>,
    agent_ai_thread: Vec<AgentAiMessage>,
    agent_panel_open: bool,
    view: Option<PanelView>,
    transfer_summary: Option<String>,
    agent_ai_session: Option<SessionId>,
    sending: bool,
    assistant_thinking: bool,
    agent_ai_thinking: bool,
    #[serde(skip)]
    ids: IdGenerator,
    #[serde(skip)]
    display: DisplayConfig,
    #[serde(skip)]
    routing: RoutingConfig,
}

impl ConversationState {
    pub fn new(session_id: SessionId, config: &SwitchboardConfig) -> Self {
        Self {
            session_id,
            customer_thread: Vec::new(),
            agent_thread: Vec::new(),
            agent_ai_thread: Vec::new(),
            agent_panel_open: false,
            view: None,
            transfer_summary: None,
            agent_ai_session: None,
            sending: false,
            assistant_thinking: false,
            agent_ai_thinking: false,
            ids: IdGenerator::default(),
            display: config.display.clone(),
            routing: config.routing.clone(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn customer_thread(&self) -> &[ChatMessage] {
        &self.customer_thread
    }

    pub fn agent_thread(&self) -> &[ChatMessage] {
        &self.agent_thread
    }

    pub fn agent_ai_thread(&self) -> &[AgentAiMessage] {
        &self.agent_ai_thread
    }

    pub fn agent_panel_open(&self) -> bool {
        self.agent_panel_open
    }

    pub fn view(&self) -> Option<PanelView> {
        self.view
    }

    pub fn transfer_summary(&self) -> Option<&str> {
        self.transfer_summary.as_deref()
    }

    /// Backend session of the human-agent assistant, once one was requested
    /// and until its creation fails.
    pub fn agent_ai_session(&self) -> Option<&SessionId> {
        self.agent_ai_session.as_ref()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn assistant_thinking(&self) -> bool {
        self.assistant_thinking
    }

    pub fn agent_ai_thinking(&self) -> bool {
        self.agent_ai_thinking
    }

    /// Number of message ids issued, across resets.
    pub fn messages_issued(&self) -> u64 {
        self.ids.issued()
    }

    /// Context the human-agent assistant session is seeded with.
    pub fn agent_session_context(&self, query: &str) -> AgentSessionContext {
        AgentSessionContext::build(
            self.transfer_summary.as_deref(),
            &self.customer_thread,
            query,
            &self.session_id,
        )
    }

    /// Apply one event at time `at`, returning what changed.
    pub fn apply(&mut self, event: ConversationEvent, at: DateTime<Utc>) -> Vec<StateChange> {
        debug!(event = event.name(), session = %self.session_id, "applying conversation event");
        let mut changes = Vec::new();

        match event {
            ConversationEvent::Reset { session_id } => {
                self.reset(session_id.unwrap_or_else(SessionId::generate), &mut changes);
            }
            ConversationEvent::CustomerMessage { text } => {
                self.customer_message(&text, at, &mut changes);
            }
            ConversationEvent::RunResponses { body } => {
                self.run_responses(&body, at, &mut changes);
            }
            ConversationEvent::RequestFailed => {
                warn!(session = %self.session_id, "chatbot request failed");
                self.append_customer_thread(
                    ChatRole::Assistant,
                    IdPrefix::Assistant,
                    self.assistant_author(),
                    CUSTOMER_APOLOGY.to_string(),
                    at,
                    &mut changes,
                );
                self.set_busy(false, &mut changes);
            }
            ConversationEvent::Socket { payload } => {
                match interpret_socket_payload(&payload, &self.session_id, &self.extract_options())
                {
                    SocketOutcome::Ignored => changes.push(StateChange::Ignored {
                        reason: "socket payload had nothing for this session",
                    }),
                    SocketOutcome::Failed { error } => {
                        changes.push(StateChange::SocketFailed { error });
                    }
                    SocketOutcome::Reply(reply) => {
                        self.apply_reply(&reply, at, &mut changes);
                        self.set_busy(false, &mut changes);
                    }
                }
            }
            ConversationEvent::HumanAgentMessage { text } => {
                self.human_agent_message(&text, at, &mut changes);
            }
            ConversationEvent::AgentPanelResponses { body } => {
                let text = extract_panel_reply(&body);
                if text.is_empty() {
                    debug!("agent panel response carried no text");
                } else {
                    self.append_agent_ai_thread(
                        AgentAiRole::AiAgent,
                        IdPrefix::AiToHuman,
                        self.assistant_author(),
                        text,
                        at,
                        &mut changes,
                    );
                }
                self.set_agent_ai_thinking(false, &mut changes);
            }
            ConversationEvent::AgentPanelFailed => {
                warn!(session = %self.session_id, "agent panel request failed");
                self.agent_panel_apology(at, &mut changes);
            }
            ConversationEvent::AgentSessionFailed => {
                warn!(session = %self.session_id, "agent assistant session could not be created");
                if let Some(session_id) = self.agent_ai_session.take() {
                    changes.push(StateChange::AgentSessionDropped { session_id });
                }
                self.agent_panel_apology(at, &mut changes);
            }
            ConversationEvent::SelectView { view } => {
                if !self.set_view(view, &mut changes) {
                    changes.push(StateChange::Ignored {
                        reason: "view already selected",
                    });
                }
            }
        }

        changes
    }

    fn reset(&mut self, session_id: SessionId, changes: &mut Vec<StateChange>) {
        info!(session = %session_id, "starting new conversation session");
        let ids = std::mem::take(&mut self.ids);
        let display = std::mem::take(&mut self.display);
        let routing = std::mem::take(&mut self.routing);
        *self = Self {
            ids,
            display,
            routing,
            ..Self::new(session_id.clone(), &SwitchboardConfig::default())
        };
        changes.push(StateChange::SessionReset { session_id });
    }

    fn customer_message(&mut self, text: &str, at: DateTime<Utc>, changes: &mut Vec<StateChange>) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            changes.push(StateChange::Ignored {
                reason: "empty customer message",
            });
            return;
        }
        if self.sending {
            changes.push(StateChange::Ignored {
                reason: "a customer message is already in flight",
            });
            return;
        }

        self.append_customer_thread(
            ChatRole::Customer,
            IdPrefix::User,
            self.display.customer_name.clone(),
            trimmed.to_string(),
            at,
            changes,
        );
        changes.push(StateChange::CustomerRequest {
            body: format_user_message(UserType::BankCustomer, trimmed),
        });
        self.set_busy(true, changes);
    }

    fn run_responses(
        &mut self,
        body: &[RunResponse],
        at: DateTime<Utc>,
        changes: &mut Vec<StateChange>,
    ) {
        let reply = extract_reply(body, &self.extract_options());
        self.apply_reply(&reply, at, changes);
        self.set_busy(false, changes);
    }

    fn human_agent_message(
        &mut self,
        text: &str,
        at: DateTime<Utc>,
        changes: &mut Vec<StateChange>,
    ) {
        if !self.agent_panel_open {
            changes.push(StateChange::Ignored {
                reason: "agent panel is closed",
            });
            return;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() {
            changes.push(StateChange::Ignored {
                reason: "empty human agent message",
            });
            return;
        }

        self.set_view(PanelView::AiChat, changes);
        self.append_agent_ai_thread(
            AgentAiRole::HumanAgent,
            IdPrefix::HumanToAi,
            format!("{} • Human Agent", self.display.human_agent_name),
            trimmed.to_string(),
            at,
            changes,
        );

        let session_id = if let Some(id) = self.agent_ai_session.clone() {
            id
        } else {
            let id = SessionId::generate();
            info!(session = %id, "requesting human agent assistant session");
            changes.push(StateChange::AgentSessionRequested {
                session_id: id.clone(),
                context: self.agent_session_context(trimmed),
            });
            self.agent_ai_session = Some(id.clone());
            id
        };
        changes.push(StateChange::AgentPanelRequest {
            session_id,
            body: format_user_message(UserType::HumanAgent, trimmed),
        });
        self.set_agent_ai_thinking(true, changes);
    }

    /// Route one classified reply into the threads.
    fn apply_reply(
        &mut self,
        reply: &AgentReply,
        at: DateTime<Utc>,
        changes: &mut Vec<StateChange>,
    ) {
        for escalation in &reply.escalations {
            info!(session = %self.session_id, "routing escalation to human agent panel");
            self.open_panel(changes);
            self.set_view(PanelView::AiChat, changes);
            self.append_agent_ai_thread(
                AgentAiRole::AiAgent,
                IdPrefix::AiToHuman,
                self.assistant_author(),
                escalation.clone(),
                at,
                changes,
            );
        }

        for text in &reply.direct_messages {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            if is_escalation_payload(trimmed) {
                debug!("keeping to_human_agent payload out of the customer thread");
                changes.push(StateChange::EscalationPayloadDropped);
                continue;
            }
            if self.routing.dedupe_consecutive
                && self.last_customer_message_is(ChatRole::Assistant, trimmed)
            {
                debug!(len = trimmed.len(), "dropping duplicate assistant message");
                changes.push(StateChange::DuplicateDropped {
                    text: trimmed.to_string(),
                });
                continue;
            }
            self.append_customer_thread(
                ChatRole::Assistant,
                IdPrefix::Assistant,
                self.assistant_author(),
                trimmed.to_string(),
                at,
                changes,
            );
        }

        if let Some(summary) = reply.latest_summary() {
            info!(session = %self.session_id, "conversation transferred to human agent");
            let notice = self.routing.transfer_notice.clone();
            if !self.last_customer_message_is(ChatRole::System, &notice) {
                self.append_customer_thread(
                    ChatRole::System,
                    IdPrefix::System,
                    format!("{} • System", self.display.assistant_name),
                    notice,
                    at,
                    changes,
                );
            }
            self.transfer_summary = Some(summary.to_string());
            changes.push(StateChange::SummaryUpdated {
                summary: summary.to_string(),
            });
            self.open_panel(changes);
            if self.view.is_none() {
                self.set_view(PanelView::Summary, changes);
            }
        }
    }

    fn agent_panel_apology(&mut self, at: DateTime<Utc>, changes: &mut Vec<StateChange>) {
        self.append_agent_ai_thread(
            AgentAiRole::AiAgent,
            IdPrefix::AiError,
            self.assistant_author(),
            AGENT_PANEL_APOLOGY.to_string(),
            at,
            changes,
        );
        self.set_agent_ai_thinking(false, changes);
    }

    fn append_customer_thread(
        &mut self,
        role: ChatRole,
        prefix: IdPrefix,
        author: String,
        text: String,
        at: DateTime<Utc>,
        changes: &mut Vec<StateChange>,
    ) {
        let id = self.ids.next(prefix, at);
        self.customer_thread.push(ChatMessage {
            id: id.clone(),
            role,
            author,
            text,
            sent_at: at,
        });
        changes.push(StateChange::CustomerThreadAppended { id, role });
        if self.agent_panel_open {
            self.mirror_agent_thread(changes);
        }
    }

    fn append_agent_ai_thread(
        &mut self,
        role: AgentAiRole,
        prefix: IdPrefix,
        author: String,
        text: String,
        at: DateTime<Utc>,
        changes: &mut Vec<StateChange>,
    ) {
        let id = self.ids.next(prefix, at);
        self.agent_ai_thread.push(AgentAiMessage {
            id: id.clone(),
            role,
            author,
            text,
            sent_at: at,
        });
        changes.push(StateChange::AgentAiThreadAppended { id, role });
    }

    fn open_panel(&mut self, changes: &mut Vec<StateChange>) {
        if !self.agent_panel_open {
            self.agent_panel_open = true;
            changes.push(StateChange::PanelOpened);
        }
        self.mirror_agent_thread(changes);
    }

    fn mirror_agent_thread(&mut self, changes: &mut Vec<StateChange>) {
        if self.agent_thread != self.customer_thread {
            self.agent_thread = self.customer_thread.clone();
            changes.push(StateChange::AgentThreadMirrored {
                len: self.agent_thread.len(),
            });
        }
    }

    /// Returns false when `view` was already showing.
    fn set_view(&mut self, view: PanelView, changes: &mut Vec<StateChange>) -> bool {
        if self.view == Some(view) {
            return false;
        }
        self.view = Some(view);
        changes.push(StateChange::ViewChanged { view });
        true
    }

    fn set_busy(&mut self, busy: bool, changes: &mut Vec<StateChange>) {
        if self.sending != busy || self.assistant_thinking != busy {
            self.sending = busy;
            self.assistant_thinking = busy;
            changes.push(StateChange::BusyChanged {
                sending: busy,
                assistant_thinking: busy,
            });
        }
    }

    fn set_agent_ai_thinking(&mut self, thinking: bool, changes: &mut Vec<StateChange>) {
        if self.agent_ai_thinking != thinking {
            self.agent_ai_thinking = thinking;
            changes.push(StateChange::AgentAiThinkingChanged { thinking });
        }
    }

    fn last_customer_message_is(&self, role: ChatRole, text: &str) -> bool {
        self.customer_thread
            .last()
            .is_some_and(|m| m.role == role && m.text == text)
    }

    fn assistant_author(&self) -> String {
        format!("{} • AI Assistant", self.display.assistant_name)
    }

    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            fallback_to_raw: self.routing.fallback_to_raw,
        }
    }
}
