// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./triage.toml` > `~/.config/triage/triage.toml` > `/etc/triage/triage.toml`
//! with environment variable overrides via `TRIAGE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TriageConfig;

const SYSTEM_CONFIG_PATH: &str = "/etc/triage/triage.toml";
const LOCAL_CONFIG_PATH: &str = "triage.toml";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults (the built-in rule table)
/// 2. `/etc/triage/triage.toml` (system-wide)
/// 3. `~/.config/triage/triage.toml` (user XDG config)
/// 4. `./triage.toml` (local directory)
/// 5. `TRIAGE_*` environment variables
pub fn load_config() -> Result<TriageConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from an inline TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TriageConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriageConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TriageConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TriageConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

fn build_figment() -> Figment {
    config_search_paths()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(TriageConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(env_provider())
}

/// Candidate config file paths in merge order. Missing files are skipped.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(user) = user_config_path() {
        paths.push(user);
    }
    paths.push(PathBuf::from(LOCAL_CONFIG_PATH));
    paths
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("triage/triage.toml"))
}

/// Environment variable provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: key names contain
/// underscores, so `TRIAGE_ROUTING_AUTO_ROUTE_THRESHOLD` must become
/// `routing.auto_route_threshold`, not `routing.auto.route.threshold`.
/// Keys arrive in their original case, so they are lowercased first.
fn env_provider() -> Env {
    Env::prefixed("TRIAGE_").map(|key| {
        key.as_str()
            .to_lowercase()
            .replacen("logging_", "logging.", 1)
            .replacen("routing_", "routing.", 1)
            .into()
    })
}
