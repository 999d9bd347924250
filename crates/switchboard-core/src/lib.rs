// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Switchboard support-chat router.
//!
//! This crate provides the error type and the wire types shared by the
//! parser, reply extraction and conversation-state crates: backend run
//! responses, socket payload envelopes, and the identifiers and roles used
//! by conversation threads.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SwitchboardError;
pub use types::{
    AgentAiRole, ChatRole, ChatbotPayload, MessageId, RunContent, RunResponse, RunResponsePart,
    SessionId,
};
