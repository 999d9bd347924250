// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state for the Switchboard support-chat router.
//!
//! Routes classified replies into the customer thread, the human-agent
//! panel, and the AI assistant thread, and tracks the busy flags and
//! panel selection the UI renders from.

pub mod context;
pub mod event;
pub mod messages;
pub mod state;

pub use context::{AgentSessionContext, HistoryEntry, NO_SUMMARY};
pub use event::{ConversationEvent, StateChange};
pub use messages::{AgentAiMessage, ChatMessage, IdGenerator, IdPrefix, PanelView};
pub use state::{ConversationState, AGENT_PANEL_APOLOGY, CUSTOMER_APOLOGY};
