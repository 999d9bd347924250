// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `switchboard replay`: drive a conversation from a JSONL transcript.
//!
//! Each non-blank line is one [`ConversationEvent`], optionally with an
//! `at` timestamp:
//!
//! ```text
//! {"event":"customer_message","text":"hi","at":"2026-01-15T09:00:00Z"}
//! {"event":"run_responses","body":[{"content":{"parts":[{"text":"..."}]}}]}
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use switchboard_config::SwitchboardConfig;
use switchboard_core::{SessionId, SwitchboardError};
use switchboard_session::{ConversationEvent, ConversationState, StateChange};
use tracing::{debug, info};

/// One transcript line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranscriptLine {
    /// When the event happened; the replay clock when absent.
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub event: ConversationEvent,
}

#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Chatbot session the conversation starts in; random when absent.
    pub session: Option<String>,
    /// Print each change as a JSON line while replaying.
    pub print_changes: bool,
}

#[derive(Serialize)]
struct ChangeRecord<'a> {
    line: usize,
    #[serde(flatten)]
    change: &'a StateChange,
}

/// Parse a transcript, reporting the 1-based line number of the first bad line.
pub fn parse_transcript(input: &str) -> Result<Vec<(usize, TranscriptLine)>, SwitchboardError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .map(|parsed| (idx + 1, parsed))
                .map_err(|e| SwitchboardError::payload(format!("transcript line {}", idx + 1), e))
        })
        .collect()
}

/// Replay `input` against a fresh conversation and return the final state.
pub fn replay(
    input: &str,
    config: &SwitchboardConfig,
    options: &ReplayOptions,
    out: &mut impl Write,
) -> Result<ConversationState, SwitchboardError> {
    let lines = parse_transcript(input)?;
    let session = options
        .session
        .clone()
        .map(SessionId)
        .unwrap_or_else(SessionId::generate);
    info!(session = %session, events = lines.len(), "replaying transcript");

    let mut state = ConversationState::new(session, config);
    for (number, line) in lines {
        let at = line.at.unwrap_or_else(Utc::now);
        let changes = state.apply(line.event, at);
        debug!(line = number, changes = changes.len(), "applied transcript line");
        if options.print_changes {
            for change in &changes {
                let record = serde_json::to_string(&ChangeRecord {
                    line: number,
                    change,
                })
                .map_err(|e| SwitchboardError::payload("encoding state change", e))?;
                writeln!(out, "{record}")?;
            }
        }
    }
    Ok(state)
}

/// Render the final state as pretty JSON.
pub fn render_state(state: &ConversationState) -> Result<String, SwitchboardError> {
    serde_json::to_string_pretty(state)
        .map_err(|e| SwitchboardError::payload("encoding conversation state", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const TRANSCRIPT: &str = r#"
{"event":"customer_message","text":"my card was charged twice","at":"2026-01-15T09:00:00Z"}
{"event":"run_responses","at":"2026-01-15T09:00:02Z","body":[{"content":{"parts":[{"text":"{\"action\":\"transfer\",\"response\":\"Let me check.\",\"summary\":\"Duplicate charge\"}"}]}}]}

{"event":"socket","payload":{"success":true,"sessionId":"sess-1","response":{"message":"Still here."}}}
"#;

    fn options(print_changes: bool) -> ReplayOptions {
        ReplayOptions {
            session: Some("sess-1".into()),
            print_changes,
        }
    }

    #[test]
    fn replays_transcript_to_final_state() {
        let mut out: Vec<u8> = Vec::new();
        let state = replay(
            TRANSCRIPT,
            &SwitchboardConfig::default(),
            &options(false),
            &mut out,
        )
        .unwrap();
        assert!(out.is_empty());
        let texts: Vec<&str> = state
            .customer_thread()
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[1], "Let me check.");
        assert_eq!(texts[3], "Still here.");
        assert_eq!(state.transfer_summary(), Some("Duplicate charge"));
        assert_eq!(state.customer_thread()[0].display_time(), "09:00");
    }

    #[test]
    fn prints_changes_with_line_numbers() {
        let mut out: Vec<u8> = Vec::new();
        replay(
            TRANSCRIPT,
            &SwitchboardConfig::default(),
            &options(true),
            &mut out,
        )
        .unwrap();
        let records: Vec<Value> = String::from_utf8_lossy(&out)
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records[0]["line"], 2);
        assert_eq!(records[0]["change"], "customer_thread_appended");
        assert!(records
            .iter()
            .any(|r| r["line"] == 3 && r["change"] == "panel_opened"));
        assert!(records.iter().all(|r| r["line"] != 4));
    }

    #[test]
    fn bad_line_reports_its_number() {
        let input = "{\"event\":\"request_failed\"}\n{\"event\":\"customer_message\"}\n";
        let err = parse_transcript(input).unwrap_err();
        match err {
            SwitchboardError::Payload { message, source } => {
                assert_eq!(message, "transcript line 2");
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn final_state_renders_as_json() {
        let state = replay(
            "{\"event\":\"request_failed\"}",
            &SwitchboardConfig::default(),
            &options(false),
            &mut Vec::<u8>::new(),
        )
        .unwrap();
        let rendered: Value = serde_json::from_str(&render_state(&state).unwrap()).unwrap();
        assert_eq!(rendered["session_id"], "sess-1");
        assert_eq!(rendered["customer_thread"][0]["role"], "assistant");
    }
}
