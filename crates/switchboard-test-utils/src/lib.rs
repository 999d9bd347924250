// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Switchboard integration tests.
//!
//! # Components
//!
//! - [`TestConversation`] - Conversation state with a ticking clock and change log
//! - [`fixtures`] - Canned run responses and socket payloads

pub mod fixtures;
pub mod harness;

pub use harness::{TestConversation, TestConversationBuilder};
