// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Triage routing engine.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and diagnostic
//! error rendering with typo suggestions. The defaults encode the built-in
//! ITSM rule table, so running without any config file is supported.
//!
//! # Usage
//!
//! ```no_run
//! use triage_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("rules: {}", config.routing.rules.len());
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{config_search_paths, load_config, load_config_from_path, load_config_from_str};
pub use model::{LoggingConfig, RouteMapping, RoutingConfig, RuleConfig, TriageConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `TriageConfig` or every diagnostic found.
pub fn load_and_validate() -> Result<TriageConfig, Vec<ConfigError>> {
    finish(loader::load_config())
}

/// Load configuration from an inline TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TriageConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content))
}

/// Load configuration from an explicit file and validate it.
///
/// Unlike the XDG lookup, a missing file is an error here.
pub fn load_and_validate_path(path: &Path) -> Result<TriageConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::Other(format!(
            "config file `{}` does not exist",
            path.display()
        ))]);
    }
    finish(loader::load_config_from_path(path))
}

fn finish(loaded: Result<TriageConfig, figment::Error>) -> Result<TriageConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            tracing::debug!(
                rules = config.routing.rules.len(),
                categories = config.routing.categories.len(),
                priorities = config.routing.priorities.len(),
                "configuration loaded"
            );
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
