// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Envelope wrapped around every message sent to the orchestration backend.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Who is speaking to the backend agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    BankCustomer,
    HumanAgent,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::BankCustomer => "bank_customer",
            UserType::HumanAgent => "human_agent",
        }
    }
}

/// `{"user_type": "...", "message": "..."}` as the backend expects it.
pub fn format_user_message(user_type: UserType, message: &str) -> String {
    json!({ "user_type": user_type.as_str(), "message": message }).to_string()
}
