// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned backend payloads.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use switchboard_core::{ChatbotPayload, RunResponse};

/// A direct answer to the customer.
pub const DIRECT_REPLY: &str = r#"{"action":"direct","response":"Happy to help with that."}"#;

/// A transfer carrying both a customer message and an agent summary.
pub const TRANSFER_REPLY: &str = r#"{"action":"transfer","response":"Let me get a colleague.","summary":"Customer disputes a card charge"}"#;

/// Guidance for the human agent.
pub const ESCALATION_REPLY: &str =
    r#"{"action":"to_human_agent","response":"Check the last three transactions"}"#;

/// Deterministic start time for conversation tests.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// One run response item holding `texts` as its parts.
pub fn run_response(texts: &[&str]) -> RunResponse {
    RunResponse::from_texts(texts.iter().copied())
}

/// Successful socket push for `session`.
pub fn socket_payload(session: &str, response: Value) -> ChatbotPayload {
    ChatbotPayload {
        success: true,
        response,
        session_id: session.to_string(),
        ..ChatbotPayload::default()
    }
}

/// Failed socket push for `session`.
pub fn failed_payload(session: &str, error: &str) -> ChatbotPayload {
    ChatbotPayload {
        success: false,
        status_code: Some(500),
        error: Some(error.to_string()),
        error_type: Some("AgentError".to_string()),
        session_id: session.to_string(),
        ..ChatbotPayload::default()
    }
}
