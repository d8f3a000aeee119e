// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled rule table.
//!
//! A [`RuleSet`] is built once from a [`RoutingConfig`] and never mutated.
//! Construction enforces the closed-world invariant: the fallback route and
//! every route named by the category or priority maps has a rule.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use triage_config::{RouteMapping, RoutingConfig};
use triage_core::{Route, TriageError};

static BUILTIN: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::from_config(&RoutingConfig::default()).expect("built-in rule table is valid")
});

/// A single compiled routing rule.
#[derive(Debug, Clone)]
pub struct RoutingRule {
    route: Route,
    keywords: Vec<String>,
    patterns: Vec<Regex>,
    priority: u32,
    module: String,
    agent: String,
}

impl RoutingRule {
    pub fn route(&self) -> Route {
        self.route
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Raw score of a normalized (lowercased) text blob against this rule.
    ///
    /// Every keyword found as a substring adds `priority`; every pattern that
    /// matches anywhere adds `priority * 2`. Hits accumulate without a cap.
    pub fn score(&self, blob: &str) -> u32 {
        let keyword_hits = self
            .keywords
            .iter()
            .filter(|k| blob.contains(k.as_str()))
            .count() as u32;
        let pattern_hits = self.patterns.iter().filter(|p| p.is_match(blob)).count() as u32;

        self.priority
            .saturating_mul(keyword_hits)
            .saturating_add(self.priority.saturating_mul(2).saturating_mul(pattern_hits))
    }
}

/// Immutable rule table plus the metadata maps and scoring tunables.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<RoutingRule>,
    categories: HashMap<String, Route>,
    priorities: HashMap<String, Route>,
    fallback: Route,
    category_bonus: u32,
    priority_bonus: u32,
    confidence_scale: f64,
    auto_route_threshold: u32,
}

impl RuleSet {
    /// Compile a rule set, failing on the first configuration error.
    ///
    /// Keywords are lowercased and deduplicated (first occurrence kept).
    /// Patterns are compiled case-insensitively in CRLF mode, so `.` matches
    /// neither `\n` nor `\r`.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, TriageError> {
        if config.rules.is_empty() {
            return Err(TriageError::EmptyRuleTable);
        }
        if !config.confidence_scale.is_finite() || config.confidence_scale <= 0.0 {
            return Err(TriageError::Config(format!(
                "confidence_scale must be a positive number, got {}",
                config.confidence_scale
            )));
        }

        let mut rules: Vec<RoutingRule> = Vec::with_capacity(config.rules.len());
        for rule in &config.rules {
            if rules.iter().any(|r| r.route == rule.route) {
                return Err(TriageError::DuplicateRoute { route: rule.route });
            }
            if rule.priority == 0 {
                return Err(TriageError::Config(format!(
                    "rule `{}` must have a priority of at least 1",
                    rule.route
                )));
            }

            let mut keywords: Vec<String> = Vec::with_capacity(rule.keywords.len());
            for keyword in &rule.keywords {
                let keyword = keyword.to_lowercase();
                if !keyword.is_empty() && !keywords.contains(&keyword) {
                    keywords.push(keyword);
                }
            }

            let patterns = rule
                .patterns
                .iter()
                .map(|pattern| {
                    RegexBuilder::new(pattern)
                        .case_insensitive(true)
                        .crlf(true)
                        .build()
                        .map_err(|e| TriageError::InvalidPattern {
                            route: rule.route,
                            pattern: pattern.clone(),
                            source: Box::new(e),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            rules.push(RoutingRule {
                route: rule.route,
                keywords,
                patterns,
                priority: rule.priority,
                module: rule.module.clone(),
                agent: rule.agent_id(),
            });
        }

        let has_rule = |route: Route| rules.iter().any(|r| r.route == route);

        if !has_rule(config.fallback) {
            return Err(TriageError::UnknownRoute {
                route: config.fallback,
                referenced_by: "the fallback".to_string(),
            });
        }
        let categories = label_map("category", &config.categories, has_rule)?;
        let priorities = label_map("priority", &config.priorities, has_rule)?;

        Ok(Self {
            categories,
            priorities,
            fallback: config.fallback,
            category_bonus: config.category_bonus,
            priority_bonus: config.priority_bonus,
            confidence_scale: config.confidence_scale,
            auto_route_threshold: config.auto_route_threshold,
            rules,
        })
    }

    /// The built-in ITSM rule table.
    pub fn builtin() -> &'static RuleSet {
        &BUILTIN
    }

    /// Rules in declaration (tie-break) order.
    pub fn rules(&self) -> &[RoutingRule] {
        &self.rules
    }

    pub fn rule(&self, route: Route) -> Option<&RoutingRule> {
        self.rules.iter().find(|r| r.route == route)
    }

    /// Rule for `route`, or the fallback rule if `route` has none.
    pub fn rule_or_fallback(&self, route: Route) -> &RoutingRule {
        self.rule(route)
            .or_else(|| self.rule(self.fallback))
            .unwrap_or(&self.rules[0])
    }

    /// Route mapped from an exact category label.
    pub fn category_route(&self, category: &str) -> Option<Route> {
        self.categories.get(category).copied()
    }

    /// Route mapped from an exact priority label.
    pub fn priority_route(&self, priority: &str) -> Option<Route> {
        self.priorities.get(priority).copied()
    }

    pub fn fallback(&self) -> Route {
        self.fallback
    }

    pub fn category_bonus(&self) -> u32 {
        self.category_bonus
    }

    pub fn priority_bonus(&self) -> u32 {
        self.priority_bonus
    }

    pub fn confidence_scale(&self) -> f64 {
        self.confidence_scale
    }

    pub fn auto_route_threshold(&self) -> u32 {
        self.auto_route_threshold
    }
}

/// Index a label map, rejecting duplicate labels and routes without a rule.
fn label_map(
    kind: &str,
    mappings: &[RouteMapping],
    has_rule: impl Fn(Route) -> bool,
) -> Result<HashMap<String, Route>, TriageError> {
    let mut map = HashMap::with_capacity(mappings.len());
    for mapping in mappings {
        if !has_rule(mapping.route) {
            return Err(TriageError::UnknownRoute {
                route: mapping.route,
                referenced_by: format!("{kind} `{}`", mapping.label),
            });
        }
        if map.insert(mapping.label.clone(), mapping.route).is_some() {
            return Err(TriageError::Config(format!(
                "{kind} label `{}` is mapped more than once",
                mapping.label
            )));
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use triage_config::RuleConfig;

    use super::*;

    fn rule_config(route: Route, keywords: &[&str], patterns: &[&str]) -> RuleConfig {
        RuleConfig {
            route,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            priority: 2,
            module: format!("/{route}"),
            agent: None,
        }
    }

    fn single_rule_config(rule: RuleConfig) -> RoutingConfig {
        RoutingConfig {
            fallback: rule.route,
            rules: vec![rule],
            categories: Default::default(),
            priorities: Default::default(),
            ..RoutingConfig::default()
        }
    }

    #[test]
    fn builtin_compiles_in_declaration_order() {
        let rules = RuleSet::builtin();
        let routes: Vec<Route> = rules.rules().iter().map(|r| r.route()).collect();
        assert_eq!(
            routes,
            vec![
                Route::ServiceDesk,
                Route::Incident,
                Route::Request,
                Route::Problem,
                Route::Change,
            ]
        );
        assert_eq!(rules.fallback(), Route::ServiceDesk);
        assert_eq!(rules.category_route("Network"), Some(Route::Incident));
        assert_eq!(rules.priority_route("Low"), Some(Route::ServiceDesk));
        assert_eq!(rules.category_route("network"), None, "labels match exactly");
    }

    #[test]
    fn keyword_hits_add_priority_each() {
        let config = single_rule_config(rule_config(Route::Incident, &["down", "crash"], &[]));
        let rules = RuleSet::from_config(&config).unwrap();
        let rule = rules.rule(Route::Incident).unwrap();
        assert_eq!(rule.score("vpn down"), 2);
        assert_eq!(rule.score("vpn down and app crash"), 4);
        // a keyword counts once even if it occurs twice
        assert_eq!(rule.score("down down down"), 2);
        assert_eq!(rule.score("all good"), 0);
    }

    #[test]
    fn pattern_hits_weigh_double() {
        let config = single_rule_config(rule_config(Route::Incident, &[], &["server.*down"]));
        let rules = RuleSet::from_config(&config).unwrap();
        let rule = rules.rule(Route::Incident).unwrap();
        assert_eq!(rule.score("the server went down"), 4);
        assert_eq!(rule.score("down server"), 0);
    }

    #[test]
    fn patterns_are_case_insensitive() {
        let config = single_rule_config(rule_config(Route::Incident, &[], &["Server.*DOWN"]));
        let rules = RuleSet::from_config(&config).unwrap();
        assert_eq!(rules.rule(Route::Incident).unwrap().score("server is down"), 4);
    }

    #[test]
    fn keywords_are_lowercased_and_deduplicated() {
        let config =
            single_rule_config(rule_config(Route::Request, &["VPN", "vpn", "", "laptop"], &[]));
        let rules = RuleSet::from_config(&config).unwrap();
        let rule = rules.rule(Route::Request).unwrap();
        assert_eq!(rule.keywords(), &["vpn".to_string(), "laptop".to_string()]);
        assert_eq!(rule.agent(), "request");
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let config = single_rule_config(rule_config(Route::Problem, &[], &["root.*(cause"]));
        let err = RuleSet::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TriageError::InvalidPattern { route: Route::Problem, ref pattern, .. }
                if pattern == "root.*(cause"
        ));
    }

    #[test]
    fn dangling_category_route_is_rejected() {
        let mut config = single_rule_config(rule_config(Route::ServiceDesk, &["help"], &[]));
        config
            .categories
            .push(RouteMapping::new("Network", Route::Incident));
        let err = RuleSet::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TriageError::UnknownRoute { route: Route::Incident, ref referenced_by }
                if referenced_by == "category `Network`"
        ));
    }

    #[test]
    fn dangling_priority_route_is_rejected() {
        let mut config = single_rule_config(rule_config(Route::ServiceDesk, &["help"], &[]));
        config
            .priorities
            .push(RouteMapping::new("Critical", Route::Incident));
        let err = RuleSet::from_config(&config).unwrap_err();
        assert!(matches!(err, TriageError::UnknownRoute { route: Route::Incident, .. }));
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let mut config = single_rule_config(rule_config(Route::ServiceDesk, &["help"], &[]));
        config.categories = vec![
            RouteMapping::new("Email", Route::ServiceDesk),
            RouteMapping::new("Email", Route::ServiceDesk),
        ];
        let err = RuleSet::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("category label `Email`"));
    }

    #[test]
    fn pattern_wildcard_stops_at_line_breaks() {
        let config = single_rule_config(rule_config(Route::Incident, &[], &["system.*down"]));
        let rules = RuleSet::from_config(&config).unwrap();
        let rule = rules.rule(Route::Incident).unwrap();
        assert_eq!(rule.score("system is down"), 4);
        assert_eq!(rule.score("system\ndown"), 0);
        assert_eq!(rule.score("system\rdown"), 0);
        assert_eq!(rule.score("system\r\nthen later\r\nsystem down"), 4);
    }

    #[test]
    fn dangling_fallback_is_rejected() {
        let mut config = single_rule_config(rule_config(Route::ServiceDesk, &["help"], &[]));
        config.fallback = Route::Change;
        let err = RuleSet::from_config(&config).unwrap_err();
        assert!(matches!(err, TriageError::UnknownRoute { route: Route::Change, .. }));
    }

    #[test]
    fn duplicate_and_empty_tables_are_rejected() {
        let mut config = single_rule_config(rule_config(Route::Change, &["patch"], &[]));
        config.rules.push(rule_config(Route::Change, &["release"], &[]));
        assert!(matches!(
            RuleSet::from_config(&config).unwrap_err(),
            TriageError::DuplicateRoute { route: Route::Change }
        ));

        config.rules.clear();
        assert!(matches!(
            RuleSet::from_config(&config).unwrap_err(),
            TriageError::EmptyRuleTable
        ));
    }

    #[test]
    fn zero_priority_is_rejected() {
        let mut rule = rule_config(Route::Change, &["patch"], &[]);
        rule.priority = 0;
        let err = RuleSet::from_config(&single_rule_config(rule)).unwrap_err();
        assert!(matches!(err, TriageError::Config(_)));
    }

    #[test]
    fn rule_set_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
