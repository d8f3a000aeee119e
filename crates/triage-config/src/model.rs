// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Triage routing engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Every section defaults to the built-in ITSM rule
//! table, so an empty file yields a working router.

use serde::{Deserialize, Serialize};
use triage_core::Route;

/// Top-level Triage configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rule table and scoring tunables.
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Logging configuration.
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

/// Ticket routing configuration.
///
/// `rules` is ordered: when two routes tie on score, the rule declared first
/// wins. `rules`, `categories` and `priorities` are arrays of tables, so a
/// config file that sets one replaces the built-in entries as a whole.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Route chosen when no rule scores above zero.
    #[serde(default = "default_fallback")]
    pub fallback: Route,

    /// Bonus added to the route mapped from the ticket's category.
    #[serde(default = "default_category_bonus")]
    pub category_bonus: u32,

    /// Bonus added to the route mapped from the ticket's priority.
    #[serde(default = "default_priority_bonus")]
    pub priority_bonus: u32,

    /// Raw score that maps to a confidence of 1.0.
    #[serde(default = "default_confidence_scale")]
    pub confidence_scale: f64,

    /// Decisions scoring strictly above this value are auto-routed.
    #[serde(default = "default_auto_route_threshold")]
    pub auto_route_threshold: u32,

    /// Routing rules in tie-break order.
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,

    /// Category label to route.
    #[serde(default = "default_categories")]
    pub categories: Vec<RouteMapping>,

    /// Priority label to route.
    #[serde(default = "default_priorities")]
    pub priorities: Vec<RouteMapping>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            category_bonus: default_category_bonus(),
            priority_bonus: default_priority_bonus(),
            confidence_scale: default_confidence_scale(),
            auto_route_threshold: default_auto_route_threshold(),
            rules: default_rules(),
            categories: default_categories(),
            priorities: default_priorities(),
        }
    }
}

/// A single routing rule.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Route this rule scores for.
    pub route: Route,

    /// Lowercase substrings; each hit adds `priority`.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Case-insensitive regular expressions; each match adds `priority * 2`.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Weight of a single keyword hit. Must be at least 1.
    pub priority: u32,

    /// Console module the ticket should open in, e.g. `/incidents`.
    pub module: String,

    /// Agent owning the route. Defaults to the route id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

impl RuleConfig {
    /// Configured agent id, or the route id when none is set.
    pub fn agent_id(&self) -> String {
        self.agent
            .clone()
            .unwrap_or_else(|| self.route.to_string())
    }
}

/// One entry of the category or priority map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouteMapping {
    /// Ticket label, compared by exact string equality.
    pub label: String,
    pub route: Route,
}

impl RouteMapping {
    pub fn new(label: impl Into<String>, route: Route) -> Self {
        Self {
            label: label.into(),
            route,
        }
    }
}

fn default_fallback() -> Route {
    Route::ServiceDesk
}

fn default_category_bonus() -> u32 {
    10
}

fn default_priority_bonus() -> u32 {
    5
}

fn default_confidence_scale() -> f64 {
    10.0
}

fn default_auto_route_threshold() -> u32 {
    15
}

fn rule(
    route: Route,
    priority: u32,
    module: &str,
    keywords: &[&str],
    patterns: &[&str],
) -> RuleConfig {
    RuleConfig {
        route,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        priority,
        module: module.to_string(),
        agent: None,
    }
}

/// The built-in ITSM rule table, in tie-break order.
pub fn default_rules() -> Vec<RuleConfig> {
    vec![
        rule(
            Route::ServiceDesk,
            1,
            "/service-desk",
            &[
                "help",
                "support",
                "question",
                "how to",
                "guide",
                "tutorial",
                "assistance",
            ],
            &["help.*with", "how.*do", "need.*help", "support.*for"],
        ),
        rule(
            Route::Incident,
            5,
            "/incidents",
            &[
                "down",
                "outage",
                "not working",
                "broken",
                "error",
                "failure",
                "crash",
                "urgent",
                "critical",
                "emergency",
            ],
            &[
                "system.*down",
                "not.*working",
                "server.*down",
                "application.*error",
                "network.*issue",
            ],
        ),
        rule(
            Route::Request,
            3,
            "/requests",
            &[
                "install",
                "request",
                "need",
                "access",
                "permission",
                "software",
                "hardware",
                "new",
            ],
            &[
                "install.*software",
                "need.*access",
                "request.*for",
                "new.*account",
            ],
        ),
        rule(
            Route::Problem,
            4,
            "/problems",
            &[
                "recurring",
                "pattern",
                "multiple",
                "frequent",
                "root cause",
                "analysis",
                "investigate",
            ],
            &[
                "recurring.*issue",
                "multiple.*users",
                "root.*cause",
                "pattern.*of",
            ],
        ),
        rule(
            Route::Change,
            3,
            "/changes",
            &[
                "change",
                "update",
                "upgrade",
                "deployment",
                "release",
                "maintenance",
                "schedule",
            ],
            &[
                "change.*request",
                "update.*system",
                "schedule.*maintenance",
                "deploy.*new",
            ],
        ),
    ]
}

fn default_categories() -> Vec<RouteMapping> {
    vec![
        RouteMapping::new("Network", Route::Incident),
        RouteMapping::new("Hardware", Route::Incident),
        RouteMapping::new("Software", Route::Request),
        RouteMapping::new("Access", Route::Request),
        RouteMapping::new("Security", Route::Incident),
        RouteMapping::new("Email", Route::ServiceDesk),
        RouteMapping::new("Phone", Route::ServiceDesk),
        RouteMapping::new("Printer", Route::ServiceDesk),
    ]
}

fn default_priorities() -> Vec<RouteMapping> {
    vec![
        RouteMapping::new("Critical", Route::Incident),
        RouteMapping::new("High", Route::Incident),
        RouteMapping::new("Medium", Route::Request),
        RouteMapping::new("Low", Route::ServiceDesk),
    ]
}
