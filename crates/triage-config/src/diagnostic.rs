// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Turns deserialization failures into diagnostics that name the offending
//! section, list the accepted keys (or route ids) and suggest the closest
//! match. Route names are a closed set, so a typo such as `incidnet` gets the
//! same "did you mean" treatment as a misspelled key.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::Diagnostic;
use thiserror::Error;

/// Minimum Jaro-Winkler similarity to offer a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}` in {section}")]
    #[diagnostic(
        code(triage::config::unknown_key),
        help("{}", format_suggestion_help(suggestion.as_deref(), "valid keys", valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Dotted path of the enclosing section, or `top level`.
        section: String,
        suggestion: Option<String>,
        valid_keys: String,
    },

    /// A route or other enum value is not one of the accepted names.
    #[error("unknown value `{value}` for `{key}`")]
    #[diagnostic(
        code(triage::config::unknown_variant),
        help("{}", format_suggestion_help(suggestion.as_deref(), "accepted values", accepted))
    )]
    UnknownVariant {
        key: String,
        value: String,
        suggestion: Option<String>,
        accepted: String,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(triage::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}` in {section}")]
    #[diagnostic(
        code(triage::config::missing_key),
        help("add `{key} = <value>` to your triage.toml")
    )]
    MissingKey { key: String, section: String },

    /// A semantic validation failure.
    #[error("validation error: {message}")]
    #[diagnostic(code(triage::config::validation))]
    Validation { message: String },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(triage::config::other))]
    Other(String),
}

fn format_suggestion_help(suggestion: Option<&str>, noun: &str, valid: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? {noun}: {valid}"),
        None => format!("{noun}: {valid}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error may carry several underlying errors; each becomes its own
/// diagnostic.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let section = section_path(&error.path);
            match &error.kind {
                Kind::UnknownField(field, expected) => ConfigError::UnknownKey {
                    key: field.clone(),
                    section,
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                },
                Kind::UnknownVariant(value, expected) => ConfigError::UnknownVariant {
                    key: error.path.join("."),
                    value: value.clone(),
                    suggestion: suggest_key(value, expected),
                    accepted: expected.join(", "),
                },
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: field.clone().into_owned(),
                    section,
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key: error.path.join("."),
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

fn section_path(path: &[String]) -> String {
    if path.is_empty() {
        "top level".to_string()
    } else {
        format!("[{}]", path.join("."))
    }
}

/// Suggest the closest valid name using Jaro-Winkler similarity.
///
/// Returns `None` when nothing clears the similarity threshold.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}
