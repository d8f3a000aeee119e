// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Triage ticket routing engine.
//!
//! This crate provides the domain types exchanged between the routing engine
//! and its callers, plus the shared error type. It carries no behavior of its
//! own: scoring lives in `triage-router`, configuration in `triage-config`.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TriageError;
pub use types::{
    Route, RoutingDecision, RoutingFeedback, RoutingStats, TicketDraft, TicketInput,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triage_error_has_all_variants() {
        let _config = TriageError::Config("test".into());
        let _pattern = TriageError::InvalidPattern {
            route: Route::Incident,
            pattern: "(".into(),
            source: Box::new(std::io::Error::other("unclosed group")),
        };
        let _unknown = TriageError::UnknownRoute {
            route: Route::Problem,
            referenced_by: "category `Network`".into(),
        };
        let _duplicate = TriageError::DuplicateRoute {
            route: Route::Change,
        };
        let _empty = TriageError::EmptyRuleTable;
        let _input = TriageError::Input {
            message: "bad ticket file".into(),
            source: None,
        };
    }

    #[test]
    fn error_messages_name_the_route() {
        let err = TriageError::UnknownRoute {
            route: Route::Problem,
            referenced_by: "category `Network`".into(),
        };
        assert_eq!(
            err.to_string(),
            "route `problem` referenced by category `Network` is not in the rule table"
        );

        let err = TriageError::DuplicateRoute {
            route: Route::Change,
        };
        assert_eq!(err.to_string(), "route `change` is declared more than once");
    }
}
