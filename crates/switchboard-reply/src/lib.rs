// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply extraction for the Switchboard router.
//!
//! Bridges raw backend traffic and the fragment classifier:
//! - [`extract_reply`]: batch of run responses -> [`AgentReply`]
//! - [`interpret_socket_payload`]: socket push envelope -> [`SocketOutcome`]
//! - [`format_user_message`]: outbound message envelope

pub mod extract;
pub mod outbound;
pub mod socket;

pub use extract::{extract_panel_reply, extract_reply, AgentReply, ExtractOptions};
pub use outbound::{format_user_message, UserType};
pub use socket::{
    flatten_socket_response, interpret_socket_payload, looks_like_run_response, SocketOutcome,
};
