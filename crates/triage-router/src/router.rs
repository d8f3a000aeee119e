// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket router: a thin, shareable holder of an immutable rule set.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};
use triage_config::RoutingConfig;
use triage_core::{RoutingDecision, RoutingFeedback, RoutingStats, TicketInput, TriageError};

use crate::classifier::{self, RouteScore};
use crate::rules::RuleSet;

/// Routes tickets against a fixed rule set.
///
/// Cloning is cheap and clones share the same rules. The router holds no
/// mutable state, so it can be used from any number of threads at once.
#[derive(Debug, Clone)]
pub struct TicketRouter {
    rules: Arc<RuleSet>,
}

impl TicketRouter {
    /// Create a router over the given rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Compile the routing configuration and wrap it in a router.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, TriageError> {
        RuleSet::from_config(config).map(Self::new)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Route a single ticket.
    pub fn route(&self, ticket: &TicketInput) -> RoutingDecision {
        let decision = classifier::route_ticket(ticket, &self.rules);
        debug!(
            route = %decision.recommended_agent,
            score = decision.score,
            confidence = decision.confidence,
            auto_route = decision.auto_route,
            "ticket routed"
        );
        decision
    }

    /// Per-route score breakdown, in rule declaration order.
    pub fn scores(&self, ticket: &TicketInput) -> Vec<RouteScore> {
        classifier::score_ticket(ticket, &self.rules)
    }

    /// Route every ticket independently and aggregate the outcomes.
    ///
    /// `accuracy` is the auto-routed fraction. For an empty batch it is
    /// `NaN`, never a silent zero.
    pub fn stats<'a, I>(&self, tickets: I) -> RoutingStats
    where
        I: IntoIterator<Item = &'a TicketInput>,
    {
        let mut total = 0usize;
        let mut auto_routed = 0usize;
        let mut by_agent = BTreeMap::new();

        for ticket in tickets {
            let decision = classifier::route_ticket(ticket, &self.rules);
            total += 1;
            *by_agent.entry(decision.recommended_agent).or_insert(0usize) += 1;
            if decision.auto_route {
                auto_routed += 1;
            }
        }

        if total == 0 {
            warn!("routing stats requested for an empty batch, accuracy is undefined");
        }

        RoutingStats {
            total,
            by_agent,
            auto_routed,
            accuracy: auto_routed as f64 / total as f64,
        }
    }

    /// Accept operator feedback on a decision.
    ///
    /// Feedback is logged and otherwise ignored: the rule set is immutable,
    /// so later decisions are unaffected.
    pub fn record_feedback(&self, feedback: &RoutingFeedback) {
        let corrected = feedback.corrected.map(|r| r.to_string());
        info!(
            ticket_id = feedback.ticket_id.as_deref().unwrap_or("-"),
            recommended = %feedback.recommended,
            corrected = corrected.as_deref().unwrap_or("-"),
            correction = feedback.is_correction(),
            comment = feedback.comment.as_deref().unwrap_or(""),
            "routing feedback received"
        );
    }
}

impl Default for TicketRouter {
    /// Router over the built-in ITSM rule table.
    fn default() -> Self {
        Self::new(RuleSet::builtin().clone())
    }
}
