// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword and pattern scoring with metadata bonuses.
//!
//! Everything here is a pure function of a ticket and a [`RuleSet`]: no I/O,
//! no shared state, identical input always gives an identical decision.

use triage_core::{Route, RoutingDecision, TicketInput};

use crate::playbook;
use crate::rules::RuleSet;

/// Score of one route for one ticket, bonuses included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteScore {
    pub route: Route,
    pub score: u32,
}

/// Lowercased `title + " " + description`, the text every rule is matched against.
pub fn normalize_text(ticket: &TicketInput) -> String {
    format!("{} {}", ticket.title, ticket.description).to_lowercase()
}

/// Score every rule against the ticket, in rule declaration order.
///
/// Text hits come first; then the category bonus and the priority bonus are
/// added to the routes their labels map to. Unknown or absent labels add
/// nothing.
pub fn score_ticket(ticket: &TicketInput, rules: &RuleSet) -> Vec<RouteScore> {
    let blob = normalize_text(ticket);

    let mut scores: Vec<RouteScore> = rules
        .rules()
        .iter()
        .map(|rule| RouteScore {
            route: rule.route(),
            score: rule.score(&blob),
        })
        .collect();

    if let Some(route) = ticket
        .category
        .as_deref()
        .and_then(|c| rules.category_route(c))
    {
        add_bonus(&mut scores, route, rules.category_bonus());
    }

    if let Some(route) = ticket
        .priority
        .as_deref()
        .and_then(|p| rules.priority_route(p))
    {
        add_bonus(&mut scores, route, rules.priority_bonus());
    }

    scores
}

fn add_bonus(scores: &mut [RouteScore], route: Route, bonus: u32) {
    if let Some(entry) = scores.iter_mut().find(|s| s.route == route) {
        entry.score = entry.score.saturating_add(bonus);
    }
}

/// Pick the winning route.
///
/// Starts from `(fallback, 0)` and only replaces the current best on a
/// strictly greater score, so ties go to the earliest-declared rule and an
/// all-zero board returns the fallback.
pub fn select_route(scores: &[RouteScore], fallback: Route) -> RouteScore {
    scores.iter().fold(
        RouteScore {
            route: fallback,
            score: 0,
        },
        |best, candidate| {
            if candidate.score > best.score {
                *candidate
            } else {
                best
            }
        },
    )
}

/// Route a ticket against a rule set.
pub fn route_ticket(ticket: &TicketInput, rules: &RuleSet) -> RoutingDecision {
    let scores = score_ticket(ticket, rules);
    let best = select_route(&scores, rules.fallback());
    let rule = rules.rule_or_fallback(best.route);

    let confidence = (f64::from(best.score) / rules.confidence_scale()).min(1.0);

    RoutingDecision {
        recommended_agent: rule.route(),
        agent_id: rule.agent().to_string(),
        score: best.score,
        confidence,
        module: rule.module().to_string(),
        reasoning: playbook::reasoning(rule.route(), ticket),
        suggested_actions: playbook::suggested_actions(rule.route()),
        auto_route: best.score > rules.auto_route_threshold(),
    }
}
