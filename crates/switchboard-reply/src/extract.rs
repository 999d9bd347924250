// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extraction of classified replies from backend run responses.

use serde::Serialize;
use switchboard_core::RunResponse;
use switchboard_parser::{is_escalation_payload, parse_segment, split_fragments, Outcome};
use tracing::debug;

/// Everything one response batch asks the UI to show, grouped by destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentReply {
    /// Messages for the customer thread, in arrival order.
    pub direct_messages: Vec<String>,
    /// Transfer summaries; only the latest one is used.
    pub transfer_summaries: Vec<String>,
    /// Messages for the AI assistant / human agent thread.
    pub escalations: Vec<String>,
}

impl AgentReply {
    /// Reply consisting only of customer-thread messages.
    pub fn direct(messages: Vec<String>) -> Self {
        Self {
            direct_messages: messages,
            ..Self::default()
        }
    }

    /// The summary that wins when a batch carries several.
    pub fn latest_summary(&self) -> Option<&str> {
        self.transfer_summaries.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.direct_messages.is_empty()
            && self.transfer_summaries.is_empty()
            && self.escalations.is_empty()
    }

    /// Route the outcomes of one raw segment into this reply.
    pub fn absorb_segment(&mut self, segment: &str) {
        for classified in parse_segment(segment) {
            for outcome in classified.outcomes {
                match outcome {
                    Outcome::Direct(text) => self.direct_messages.push(text),
                    Outcome::TransferSummary(text) => self.transfer_summaries.push(text),
                    Outcome::Escalation(text) => self.escalations.push(text),
                    Outcome::PlainText(text) => {
                        if is_escalation_payload(&text) {
                            debug!("dropping unroutable to_human_agent fragment");
                        } else {
                            self.direct_messages.push(text);
                        }
                    }
                }
            }
        }
    }
}

/// Knobs for [`extract_reply`].
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Show the first raw fragment when nothing else classified.
    pub fallback_to_raw: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fallback_to_raw: true,
        }
    }
}

/// Classify every text part of a response batch.
///
/// When the batch yields neither a direct message nor a transfer summary and
/// `fallback_to_raw` is set, the raw text of the first fragment of the first
/// part of the first item is shown as a direct message, unless it is an
/// escalation payload.
pub fn extract_reply(responses: &[RunResponse], options: &ExtractOptions) -> AgentReply {
    let mut reply = AgentReply::default();

    for text in responses.iter().flat_map(RunResponse::part_texts) {
        let text = text.trim();
        if !text.is_empty() {
            reply.absorb_segment(text);
        }
    }

    if options.fallback_to_raw
        && reply.direct_messages.is_empty()
        && reply.transfer_summaries.is_empty()
    {
        let fallback = responses
            .first()
            .and_then(RunResponse::first_part_text)
            .and_then(|text| split_fragments(text).into_iter().next())
            .filter(|fragment| !is_escalation_payload(fragment));
        if let Some(fragment) = fallback {
            debug!(len = fragment.len(), "no routable outcome, falling back to raw fragment");
            reply.direct_messages.push(fragment);
        }
    }

    reply
}

/// Replies from the human-agent assistant are plain markdown: join every
/// non-empty part with a blank line, no classification.
pub fn extract_panel_reply(responses: &[RunResponse]) -> String {
    responses
        .iter()
        .flat_map(RunResponse::part_texts)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(parts: &[&[&str]]) -> Vec<RunResponse> {
        parts
            .iter()
            .map(|texts| RunResponse::from_texts(texts.iter().copied()))
            .collect()
    }

    #[test]
    fn routes_outcomes_by_destination() {
        let responses = batch(&[&[
            "{\"action\":\"direct\",\"response\":\"Hi!\"}\n{\"action\":\"to_human_agent\",\"response\":\"verify id\"}",
            "{\"action\":\"transfer\",\"response\":\"One moment\",\"summary\":\"refund\"}",
        ]]);
        let reply = extract_reply(&responses, &ExtractOptions::default());
        assert_eq!(reply.direct_messages, vec!["Hi!", "One moment"]);
        assert_eq!(reply.transfer_summaries, vec!["refund"]);
        assert_eq!(reply.escalations, vec!["verify id"]);
    }

    #[test]
    fn latest_summary_wins() {
        let responses = batch(&[
            &["{\"summary\":\"first\"}"],
            &["{\"action\":\"transfer\",\"summary\":\"second\"}"],
        ]);
        let reply = extract_reply(&responses, &ExtractOptions::default());
        assert_eq!(reply.latest_summary(), Some("second"));
    }

    #[test]
    fn plain_text_becomes_direct() {
        let reply = extract_reply(&batch(&[&["  Hello there  "]]), &ExtractOptions::default());
        assert_eq!(reply.direct_messages, vec!["Hello there"]);
    }

    #[test]
    fn unroutable_escalation_fragment_is_dropped() {
        let reply = extract_reply(
            &batch(&[&["{\"action\":\"to_human_agent\",\"response\":null}"]]),
            &ExtractOptions::default(),
        );
        assert!(reply.is_empty());
    }

    #[test]
    fn escalation_only_batch_skips_fallback() {
        let reply = extract_reply(
            &batch(&[&["{\"action\":\"to_human_agent\",\"response\":\"x\"}"]]),
            &ExtractOptions::default(),
        );
        assert!(reply.direct_messages.is_empty());
        assert_eq!(reply.escalations, vec!["x"]);
    }

    #[test]
    fn empty_transfer_shows_raw_text() {
        let raw = "{\"action\":\"transfer\"}";
        let reply = extract_reply(&batch(&[&[raw]]), &ExtractOptions::default());
        assert_eq!(reply.direct_messages, vec![raw]);
    }

    const TWO_ESCALATIONS: &str = "{\"action\":\"to_human_agent\",\"response\":\"a\"}\n{\"action\":\"to_human_agent\",\"response\":\"b\"}";

    #[test]
    fn fallback_never_shows_escalations_sharing_a_part() {
        let responses = vec![
            RunResponse::from_texts([TWO_ESCALATIONS]),
            RunResponse::from_texts(["{\"action\":\"to_human_agent\",\"response\":\"c\"}"]),
        ];
        let reply = extract_reply(&responses, &ExtractOptions::default());
        assert_eq!(reply.escalations, vec!["a", "b", "c"]);
        assert!(reply.direct_messages.is_empty());
    }

    #[test]
    fn fallback_can_be_disabled() {
        let options = ExtractOptions {
            fallback_to_raw: false,
        };
        let reply = extract_reply(&batch(&[&[TWO_ESCALATIONS]]), &options);
        assert!(reply.direct_messages.is_empty());
        assert_eq!(reply.escalations.len(), 2);
    }

    #[test]
    fn empty_batch_yields_empty_reply() {
        assert!(extract_reply(&[], &ExtractOptions::default()).is_empty());
        let no_content = vec![RunResponse::default()];
        assert!(extract_reply(&no_content, &ExtractOptions::default()).is_empty());
    }

    #[test]
    fn panel_reply_joins_parts() {
        let responses = batch(&[&["**Step 1**", "  "], &["Step 2\n"]]);
        assert_eq!(extract_panel_reply(&responses), "**Step 1**\n\nStep 2");
    }
}
