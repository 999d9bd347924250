// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Action-based classification of reply fragments.
//!
//! A fragment that parses as a JSON object is routed by its `action` field;
//! anything else is shown as-is. Classification is total: every fragment
//! yields at least one [`Outcome`].

use serde::Serialize;
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use tracing::trace;

use crate::splitter::split_fragments;

/// The `action` discriminator emitted by the orchestration backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    /// Answer the customer directly.
    Direct,
    /// Hand the conversation to a human, with a summary for the agent.
    Transfer,
    /// Guidance addressed to the human agent, not the customer.
    ToHumanAgent,
}

impl Action {
    /// Parse an `action` value; matching ignores case.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.to_lowercase().parse().ok()
    }
}

/// Where one piece of a classified fragment should be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Outcome {
    /// Text for the customer conversation.
    Direct(String),
    /// Summary handed to the human agent on transfer.
    TransferSummary(String),
    /// Text for the AI assistant / human agent thread.
    Escalation(String),
    /// Unrecognized fragment, shown verbatim in the customer conversation.
    PlainText(String),
}

impl Outcome {
    /// The carried text, whatever the destination.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Direct(t)
            | Outcome::TransferSummary(t)
            | Outcome::Escalation(t)
            | Outcome::PlainText(t) => t,
        }
    }

    /// Consume the outcome, keeping only its text.
    pub fn into_text(self) -> String {
        match self {
            Outcome::Direct(t)
            | Outcome::TransferSummary(t)
            | Outcome::Escalation(t)
            | Outcome::PlainText(t) => t,
        }
    }
}

/// One fragment of a raw segment together with its outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedFragment {
    pub fragment: String,
    pub outcomes: Vec<Outcome>,
}

/// Split a raw segment and classify every fragment, preserving order.
pub fn parse_segment(segment: &str) -> Vec<ClassifiedFragment> {
    let classified: Vec<ClassifiedFragment> = split_fragments(segment)
        .into_iter()
        .map(|fragment| {
            let outcomes = classify_fragment(&fragment);
            ClassifiedFragment { fragment, outcomes }
        })
        .collect();
    trace!(
        segment_len = segment.len(),
        fragments = classified.len(),
        "parsed reply segment"
    );
    classified
}

/// Classify a single fragment.
///
/// Rules, first match wins:
/// 1. `action: direct` with a string `response` -> [`Outcome::Direct`]
/// 2. `action: transfer` -> `Direct(response)` and/or `TransferSummary(summary)`
/// 3. `action: to_human_agent` with a string `response` -> [`Outcome::Escalation`]
/// 4. a string `response` -> `Direct`
/// 5. a string `summary` -> `TransferSummary`
/// 6. a string `message` -> `Direct`
///
/// A bare JSON string is `Direct`. Everything else, including parse failures,
/// non-object JSON and a `transfer` without `response` or `summary`, is
/// [`Outcome::PlainText`] carrying the fragment unchanged.
pub fn classify_fragment(fragment: &str) -> Vec<Outcome> {
    let classified = match serde_json::from_str::<Value>(fragment) {
        Ok(Value::String(text)) => Some(vec![Outcome::Direct(text)]),
        Ok(Value::Object(map)) => classify_object(&map),
        Ok(_) | Err(_) => None,
    };
    classified.unwrap_or_else(|| vec![Outcome::PlainText(fragment.to_string())])
}

fn classify_object(map: &Map<String, Value>) -> Option<Vec<Outcome>> {
    let action = map.get("action").and_then(Value::as_str).and_then(Action::parse);
    let response = string_field(map, "response");
    let summary = string_field(map, "summary");

    match (action, response) {
        (Some(Action::Direct), Some(response)) => {
            return Some(vec![Outcome::Direct(response.to_string())]);
        }
        (Some(Action::Transfer), _) => {
            let outcomes: Vec<Outcome> = response
                .map(|r| Outcome::Direct(r.to_string()))
                .into_iter()
                .chain(summary.map(|s| Outcome::TransferSummary(s.to_string())))
                .collect();
            return (!outcomes.is_empty()).then_some(outcomes);
        }
        (Some(Action::ToHumanAgent), Some(response)) => {
            return Some(vec![Outcome::Escalation(response.to_string())]);
        }
        _ => {}
    }

    if let Some(response) = response {
        return Some(vec![Outcome::Direct(response.to_string())]);
    }
    if let Some(summary) = summary {
        return Some(vec![Outcome::TransferSummary(summary.to_string())]);
    }
    string_field(map, "message").map(|m| vec![Outcome::Direct(m.to_string())])
}

fn string_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// True when `text` is a JSON object whose `action` is `to_human_agent`
/// (any case). Used to keep agent-facing payloads out of the customer thread.
pub fn is_escalation_payload(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => map
            .get("action")
            .and_then(Value::as_str)
            .is_some_and(|a| a.to_lowercase() == "to_human_agent"),
        _ => false,
    }
}
