// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations. Each returns the text to print on stdout.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;
use triage_config::RoutingConfig;
use triage_core::{TicketInput, TriageError};
use triage_router::{draft_ticket, TicketRouter};

/// Route one ticket and render the decision as JSON.
pub fn route(router: &TicketRouter, ticket: &TicketInput) -> Result<String, TriageError> {
    to_json(&router.route(ticket))
}

/// Route a JSON array of tickets read from `path` and render the statistics.
pub fn stats(router: &TicketRouter, path: &Path) -> Result<String, TriageError> {
    let content = std::fs::read_to_string(path).map_err(|e| TriageError::Input {
        message: format!("cannot read `{}`", path.display()),
        source: Some(Box::new(e)),
    })?;
    let tickets = parse_tickets(&content)?;
    to_json(&router.stats(&tickets))
}

/// Parse a JSON array of ticket records.
pub fn parse_tickets(json: &str) -> Result<Vec<TicketInput>, TriageError> {
    serde_json::from_str(json).map_err(|e| TriageError::Input {
        message: "expected a JSON array of tickets".to_string(),
        source: Some(Box::new(e)),
    })
}

#[derive(Serialize)]
struct DraftOutput<'a> {
    draft: &'a triage_core::TicketDraft,
    decision: triage_core::RoutingDecision,
}

/// Draft a ticket from chat text and route the draft.
pub fn draft(router: &TicketRouter, conversation: &str) -> Result<String, TriageError> {
    let draft = draft_ticket(conversation).ok_or_else(|| TriageError::Input {
        message: "conversation text is empty".to_string(),
        source: None,
    })?;
    let decision = router.route(&TicketInput::from(draft.clone()));
    to_json(&DraftOutput {
        draft: &draft,
        decision,
    })
}

/// Human-readable summary of the config sources and the effective rule table.
pub fn rules(router: &TicketRouter, config: &RoutingConfig, sources: &[PathBuf]) -> String {
    let rules = router.rules();
    let mut out = String::new();

    for path in sources {
        let state = if path.is_file() { "loaded" } else { "not found" };
        let _ = writeln!(out, "source {} ({state})", path.display());
    }

    let _ = writeln!(
        out,
        "fallback={} category_bonus={} priority_bonus={} confidence_scale={} auto_route_threshold={}",
        rules.fallback(),
        rules.category_bonus(),
        rules.priority_bonus(),
        rules.confidence_scale(),
        rules.auto_route_threshold(),
    );

    for (i, rule) in rules.rules().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {:<12} priority={} module={} agent={} keywords={} patterns={}",
            i + 1,
            rule.route(),
            rule.priority(),
            rule.module(),
            rule.agent(),
            rule.keywords().len(),
            rule.patterns().count(),
        );
    }

    for mapping in &config.categories {
        let _ = writeln!(out, "category {} -> {}", mapping.label, mapping.route);
    }
    for mapping in &config.priorities {
        let _ = writeln!(out, "priority {} -> {}", mapping.label, mapping.route);
    }

    out
}

fn to_json<T: Serialize>(value: &T) -> Result<String, TriageError> {
    serde_json::to_string_pretty(value).map_err(|e| TriageError::Input {
        message: "cannot encode output as JSON".to_string(),
        source: Some(Box::new(e)),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn route_prints_camel_case_decision() {
        let router = TicketRouter::default();
        let ticket = TicketInput::new("System is down", "production server down, urgent")
            .with_category("Network")
            .with_priority("Critical");
        let out = route(&router, &ticket).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["recommendedAgent"], "incident");
        assert_eq!(value["autoRoute"], true);
    }

    #[test]
    fn stats_reads_ticket_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"title": "System is down", "description": "server down", "priority": "Critical"}},
                {{"title": "How do I print", "description": "need help with printer", "id": 7}}
            ]"#
        )
        .unwrap();

        let out = stats(&TicketRouter::default(), file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["byAgent"]["incident"], 1);
        assert_eq!(value["byAgent"]["servicedesk"], 1);
    }

    #[test]
    fn empty_ticket_array_prints_null_accuracy() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let out = stats(&TicketRouter::default(), file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], 0);
        assert!(value["accuracy"].is_null());
    }

    #[test]
    fn bad_ticket_json_is_an_input_error() {
        let err = parse_tickets(r#"{"title": "not an array"}"#).unwrap_err();
        assert!(matches!(err, TriageError::Input { source: Some(_), .. }));

        let err = stats(&TicketRouter::default(), Path::new("/nonexistent/tickets.json"))
            .unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn draft_prints_draft_and_decision() {
        let out = draft(&TicketRouter::default(), "cannot login to outlook web").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["draft"]["category"], "Email");
        assert!(value["decision"]["recommendedAgent"].is_string());

        assert!(draft(&TicketRouter::default(), "   ").is_err());
    }

    #[test]
    fn rules_lists_table_in_declaration_order() {
        let config = RoutingConfig::default();
        let router = TicketRouter::from_config(&config).unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        let sources = vec![
            PathBuf::from("/nonexistent/triage.toml"),
            file.path().to_path_buf(),
        ];

        let out = rules(&router, &config, &sources);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "source /nonexistent/triage.toml (not found)");
        assert!(lines[1].ends_with("(loaded)"));
        assert!(lines[2].starts_with("fallback=servicedesk"));
        assert!(lines[3].starts_with("1. servicedesk"));
        assert!(lines[7].starts_with("5. change"));
        assert!(out.contains("category Network -> incident"));
        assert!(out.contains("priority Low -> servicedesk"));
    }
}
