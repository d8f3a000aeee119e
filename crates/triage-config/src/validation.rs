// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the semantic constraints serde cannot express: the rule table is
//! closed-world (every mapped route has a rule), patterns compile, keywords
//! can actually match lowercased ticket text, and the scoring tunables are
//! usable.

use std::collections::HashSet;

use regex::RegexBuilder;
use triage_core::Route;

use crate::diagnostic::ConfigError;
use crate::model::{RouteMapping, RoutingConfig, TriageConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns all collected validation errors; does not fail fast.
pub fn validate_config(config: &TriageConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.logging.level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    validate_routing(&config.routing, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routing(routing: &RoutingConfig, errors: &mut Vec<ConfigError>) {
    let mut push = |message: String| errors.push(ConfigError::Validation { message });

    if routing.rules.is_empty() {
        push("routing.rules must declare at least one rule".to_string());
    }

    if !routing.confidence_scale.is_finite() || routing.confidence_scale <= 0.0 {
        push(format!(
            "routing.confidence_scale must be a positive number, got {}",
            routing.confidence_scale
        ));
    }

    let mut declared = HashSet::new();
    for (i, rule) in routing.rules.iter().enumerate() {
        let at = format!("routing.rules[{i}] ({})", rule.route);

        if !declared.insert(rule.route) {
            push(format!("duplicate rule for route `{}` at routing.rules[{i}]", rule.route));
        }

        if rule.priority == 0 {
            push(format!("{at}: priority must be at least 1"));
        }

        if rule.module.trim().is_empty() {
            push(format!("{at}: module must not be empty"));
        }

        if rule.agent.as_deref().is_some_and(|a| a.trim().is_empty()) {
            push(format!("{at}: agent must not be empty when set"));
        }

        let mut seen_keywords = HashSet::new();
        for keyword in &rule.keywords {
            if keyword.trim().is_empty() {
                push(format!("{at}: keywords must not be empty"));
            } else if *keyword != keyword.to_lowercase() {
                push(format!(
                    "{at}: keyword `{keyword}` must be lowercase, ticket text is lowercased before matching"
                ));
            }
            if !seen_keywords.insert(keyword.as_str()) {
                push(format!("{at}: duplicate keyword `{keyword}`"));
            }
        }

        for pattern in &rule.patterns {
            let compiled = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .crlf(true)
                .build();
            if let Err(e) = compiled {
                push(format!("{at}: pattern `{pattern}` does not compile: {e}"));
            }
        }
    }

    if !declared.contains(&routing.fallback) {
        push(format!(
            "routing.fallback `{}` has no rule in routing.rules",
            routing.fallback
        ));
    }

    validate_mappings("routing.categories", &routing.categories, &declared, &mut push);
    validate_mappings("routing.priorities", &routing.priorities, &declared, &mut push);
}

fn validate_mappings(
    section: &str,
    mappings: &[RouteMapping],
    declared: &HashSet<Route>,
    push: &mut impl FnMut(String),
) {
    let mut seen_labels = HashSet::new();
    for (i, mapping) in mappings.iter().enumerate() {
        let at = format!("{section}[{i}] ({})", mapping.label);

        if !seen_labels.insert(mapping.label.as_str()) {
            push(format!("{at}: duplicate label `{}`", mapping.label));
        }

        if !declared.contains(&mapping.route) {
            push(format!(
                "{at} targets route `{}` which has no rule",
                mapping.route
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RuleConfig;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&TriageConfig::default()).is_ok());
    }

    #[test]
    fn unknown_log_level_fails() {
        let mut config = TriageConfig::default();
        config.logging.level = "verbose".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "logging.level"));
    }

    #[test]
    fn dangling_category_target_fails() {
        let mut config = TriageConfig::default();
        config.routing.rules.retain(|r| r.route != Route::Incident);
        let errors = validate_config(&config).unwrap_err();
        // Network, Hardware, Security, Critical and High all point at incident.
        assert!(has_error(&errors, "routing.categories[0] (Network)"));
        assert!(has_error(&errors, "routing.priorities[0] (Critical)"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn fallback_without_rule_fails() {
        let mut config = TriageConfig::default();
        config.routing.rules.retain(|r| r.route != Route::ServiceDesk);
        config.routing.categories.retain(|m| m.route != Route::ServiceDesk);
        config.routing.priorities.retain(|m| m.route != Route::ServiceDesk);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "routing.fallback"));
    }

    #[test]
    fn bad_rule_fields_are_all_reported() {
        let mut config = TriageConfig::default();
        config.routing.rules[0] = RuleConfig {
            route: Route::ServiceDesk,
            keywords: vec!["Help".into(), "guide".into(), "guide".into()],
            patterns: vec!["(unclosed".into()],
            priority: 0,
            module: " ".into(),
            agent: None,
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "priority must be at least 1"));
        assert!(has_error(&errors, "module must not be empty"));
        assert!(has_error(&errors, "keyword `Help` must be lowercase"));
        assert!(has_error(&errors, "duplicate keyword `guide`"));
        assert!(has_error(&errors, "does not compile"));
    }

    #[test]
    fn duplicate_route_fails() {
        let mut config = TriageConfig::default();
        let extra = config.routing.rules[1].clone();
        config.routing.rules.push(extra);
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "duplicate rule for route `incident`"));
    }

    #[test]
    fn non_positive_confidence_scale_fails() {
        let mut config = TriageConfig::default();
        config.routing.confidence_scale = 0.0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "confidence_scale"));
    }

    #[test]
    fn empty_rule_table_fails() {
        let mut config = TriageConfig::default();
        config.routing.rules.clear();
        config.routing.categories.clear();
        config.routing.priorities.clear();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "at least one rule"));
        assert!(has_error(&errors, "routing.fallback"));
    }

    #[test]
    fn duplicate_labels_fail() {
        let mut config = TriageConfig::default();
        config
            .routing
            .priorities
            .push(RouteMapping::new("Critical", Route::ServiceDesk));
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "routing.priorities[4] (Critical): duplicate label"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn reduced_table_with_matching_maps_validates() {
        let mut config = TriageConfig::default();
        config
            .routing
            .rules
            .retain(|r| matches!(r.route, Route::ServiceDesk | Route::Change));
        config.routing.categories = vec![RouteMapping::new("Email", Route::ServiceDesk)];
        config.routing.priorities.clear();
        assert!(validate_config(&config).is_ok());
    }
}
