// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Triage routing engine.

use thiserror::Error;

use crate::types::Route;

/// The error type shared by rule-set construction, configuration and the CLI.
///
/// Routing itself never fails: every variant here describes a problem that is
/// detected while building a rule set or reading caller input, before any
/// ticket is scored.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Configuration errors (unreadable file, invalid TOML, failed validation).
    #[error("configuration error: {0}")]
    Config(String),

    /// A rule pattern failed to compile as a regular expression.
    #[error("invalid pattern `{pattern}` in rule `{route}`: {source}")]
    InvalidPattern {
        route: Route,
        pattern: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A category map, priority map or fallback names a route with no rule.
    #[error("route `{route}` referenced by {referenced_by} is not in the rule table")]
    UnknownRoute { route: Route, referenced_by: String },

    /// The same route appears twice in the rule table.
    #[error("route `{route}` is declared more than once")]
    DuplicateRoute { route: Route },

    /// The rule table has no rules at all.
    #[error("rule table is empty")]
    EmptyRuleTable,

    /// Caller-supplied input could not be read or decoded.
    #[error("input error: {message}")]
    Input {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}
