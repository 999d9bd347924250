// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interpretation of payloads pushed over the socket channel.
//!
//! The socket delivers the same replies as the HTTP `run` call, but the
//! `response` body comes in several shapes: an array of run responses, a
//! single run response, or an arbitrary envelope of strings nested under
//! `text`, `message`, `response`, `messages`, `content` or `parts`. Envelope
//! strings are raw segments and go through the same classification as run
//! response parts.

use serde_json::Value;
use switchboard_core::{ChatbotPayload, RunResponse, SessionId};
use tracing::{debug, warn};

use crate::extract::{extract_reply, AgentReply, ExtractOptions};

/// Keys searched for text in a generic envelope, in order.
const ENVELOPE_KEYS: &[&str] = &["text", "message", "response", "messages", "content", "parts"];

/// What a socket payload means for the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketOutcome {
    /// Addressed to another session, or carried nothing to show.
    Ignored,
    /// The backend reported a failure for this session.
    Failed { error: Option<String> },
    /// A reply to route into the conversation threads.
    Reply(AgentReply),
}

/// Decide what a socket payload means for `session`.
pub fn interpret_socket_payload(
    payload: &ChatbotPayload,
    session: &SessionId,
    options: &ExtractOptions,
) -> SocketOutcome {
    if payload.session_id != session.as_str() {
        debug!(
            payload_session = %payload.session_id,
            session = %session,
            "ignoring socket payload for another session"
        );
        return SocketOutcome::Ignored;
    }

    if !payload.success {
        warn!(
            error = payload.error.as_deref().unwrap_or("unknown"),
            error_type = payload.error_type.as_deref().unwrap_or("unknown"),
            status_code = payload.status_code,
            "chatbot socket reported an error"
        );
        return SocketOutcome::Failed {
            error: payload.error.clone(),
        };
    }

    match &payload.response {
        Value::Array(items) if items.iter().all(looks_like_run_response) => {
            let responses: Vec<RunResponse> = items.iter().map(decode_run_response).collect();
            SocketOutcome::Reply(extract_reply(&responses, options))
        }
        single if looks_like_run_response(single) => {
            let responses = [decode_run_response(single)];
            SocketOutcome::Reply(extract_reply(&responses, options))
        }
        other => {
            let mut reply = AgentReply::default();
            for segment in flatten_socket_response(other) {
                reply.absorb_segment(&segment);
            }
            if reply.is_empty() {
                debug!("socket payload carried no routable text");
                SocketOutcome::Ignored
            } else {
                SocketOutcome::Reply(reply)
            }
        }
    }
}

/// An object with a `content` or `partial` key is treated as a run response.
pub fn looks_like_run_response(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.contains_key("content") || map.contains_key("partial"))
}

fn decode_run_response(value: &Value) -> RunResponse {
    serde_json::from_value(value.clone()).unwrap_or_else(|err| {
        debug!(error = %err, "skipping malformed run response");
        RunResponse::default()
    })
}

/// Collect every non-empty trimmed string reachable through the envelope keys.
///
/// Arrays are flattened in order; numbers, booleans and null contribute nothing.
pub fn flatten_socket_response(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect_strings(value, &mut out);
    out
}

fn collect_strings(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        Value::Object(map) => {
            for key in ENVELOPE_KEYS {
                if let Some(inner) = map.get(*key) {
                    collect_strings(inner, out);
                }
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
