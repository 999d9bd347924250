// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-based layered config loading.
//!
//! Lookup order: `/etc/switchboard/switchboard.toml`, then
//! `~/.config/switchboard/switchboard.toml`, then `./switchboard.toml`, then
//! `SWITCHBOARD_*` environment variables. Later layers win.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SwitchboardConfig;

const FILE_NAME: &str = "switchboard.toml";

/// Config files consulted by [`load_config`], lowest precedence first.
pub fn config_file_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/etc/switchboard").join(FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("switchboard").join(FILE_NAME));
    }
    paths.push(PathBuf::from(FILE_NAME));
    paths
}

/// Build the full figment (defaults, every config file, env overrides).
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(SwitchboardConfig::default()));
    for path in config_file_paths() {
        if path.exists() {
            tracing::debug!(path = %path.display(), "merging config file");
        }
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<SwitchboardConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<SwitchboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SwitchboardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SwitchboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SwitchboardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// `SWITCHBOARD_ROUTING_TRANSFER_NOTICE` must land on `routing.transfer_notice`,
/// so sections are mapped explicitly instead of splitting on every underscore.
fn env_provider() -> Env {
    Env::prefixed("SWITCHBOARD_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    key.replacen("display_", "display.", 1)
        .replacen("routing_", "routing.", 1)
        .replacen("logging_", "logging.", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("routing_transfer_notice"), "routing.transfer_notice");
        assert_eq!(map_env_key("display_assistant_name"), "display.assistant_name");
        assert_eq!(map_env_key("logging_level"), "logging.level");
    }

    #[test]
    fn local_file_has_highest_file_precedence() {
        let paths = config_file_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from("switchboard.toml")));
        assert_eq!(paths[0], PathBuf::from("/etc/switchboard/switchboard.toml"));
    }
}
