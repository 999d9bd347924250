// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response-fragment parsing for the Switchboard router.
//!
//! This crate provides:
//! - [`split_fragments`]: splits a raw reply into JSON-object and plain-text fragments
//! - [`classify_fragment`]: maps one fragment to its [`Outcome`]s by `action`
//! - [`is_escalation_payload`]: detects `to_human_agent` payloads
//!
//! Every function here is pure: no I/O, no shared state, no failure path.
//! Malformed input degrades to [`Outcome::PlainText`].

pub mod classifier;
pub mod splitter;

pub use classifier::{
    classify_fragment, is_escalation_payload, parse_segment, Action, ClassifiedFragment, Outcome,
};
pub use splitter::split_fragments;
