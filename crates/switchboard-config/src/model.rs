// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key fails
//! at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level Switchboard configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SwitchboardConfig {
    /// Author names shown on thread messages.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Message routing policies.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SwitchboardConfig {
    /// Render the effective configuration back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Display names used when authoring thread messages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Name of the AI assistant ("Alex • AI Assistant").
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Name shown on customer messages.
    #[serde(default = "default_customer_name")]
    pub customer_name: String,

    /// Name of the human agent ("Agent • Human Agent").
    #[serde(default = "default_human_agent_name")]
    pub human_agent_name: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            assistant_name: default_assistant_name(),
            customer_name: default_customer_name(),
            human_agent_name: default_human_agent_name(),
        }
    }
}

fn default_assistant_name() -> String {
    "Alex".to_string()
}

fn default_customer_name() -> String {
    "Customer".to_string()
}

fn default_human_agent_name() -> String {
    "Agent".to_string()
}

/// Policies applied when classified replies are routed into threads.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Drop an assistant message identical to the one directly before it.
    /// Absorbs the same reply arriving over both HTTP and the socket.
    #[serde(default = "default_true")]
    pub dedupe_consecutive: bool,

    /// Show the first raw part text when a response batch classifies to
    /// neither a direct message nor a transfer summary.
    #[serde(default = "default_true")]
    pub fallback_to_raw: bool,

    /// System notice posted to the customer when a conversation transfers.
    #[serde(default = "default_transfer_notice")]
    pub transfer_notice: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            dedupe_consecutive: true,
            fallback_to_raw: true,
            transfer_notice: default_transfer_notice(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_transfer_notice() -> String {
    "I’m consulting a Human Supervisor, Give me a few moments.".to_string()
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
