// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types exchanged between the routing engine and its callers.
//!
//! Field names serialize in camelCase so the types drop straight into the
//! console's JSON payloads; the engine itself never serializes anything.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Operational queue a ticket can be routed to.
///
/// The variant order is only used for map ordering. Tie-breaking between
/// routes follows the declaration order of the rule table, not this enum.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// General support questions and how-tos.
    ServiceDesk,
    /// Outages and broken services.
    Incident,
    /// Requests for software, hardware or access.
    Request,
    /// Recurring issues needing root cause analysis.
    Problem,
    /// Updates, releases and scheduled maintenance.
    Change,
}

/// A ticket as submitted by the caller.
///
/// Missing `title`/`description` deserialize to empty strings. Unknown fields
/// of the caller's ticket record are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Category label, matched exactly against the category route map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Priority label (`Critical`, `High`, `Medium`, `Low`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl TicketInput {
    /// Create a ticket with no category or priority.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: None,
            priority: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}

/// Routing decision for a single ticket. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDecision {
    /// The winning route.
    pub recommended_agent: Route,
    /// Agent id configured on the winning rule.
    pub agent_id: String,
    /// Winning raw score, bonuses included.
    pub score: u32,
    /// Normalized score in `[0.0, 1.0]`.
    pub confidence: f64,
    /// UI destination of the winning rule.
    pub module: String,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
    /// Four operational next steps for the winning route.
    pub suggested_actions: Vec<String>,
    /// Whether the decision is strong enough to skip manual triage.
    pub auto_route: bool,
}

/// Aggregate routing statistics over a batch of tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingStats {
    pub total: usize,
    /// Ticket count per recommended route. Routes that never won are absent.
    pub by_agent: BTreeMap<Route, usize>,
    pub auto_routed: usize,
    /// `auto_routed / total`. `NaN` when `total` is zero; check `total`
    /// before trusting this value.
    pub accuracy: f64,
}

impl RoutingStats {
    /// Number of tickets routed to `route`.
    pub fn count_for(&self, route: Route) -> usize {
        self.by_agent.get(&route).copied().unwrap_or(0)
    }
}

/// Operator feedback on a routing decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    /// Route the engine recommended.
    pub recommended: Route,
    /// Route an operator moved the ticket to, if they disagreed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corrected: Option<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RoutingFeedback {
    /// True when an operator moved the ticket to a different route.
    pub fn is_correction(&self) -> bool {
        self.corrected.is_some_and(|c| c != self.recommended)
    }
}

/// A ticket pre-filled from free-form support chat text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub category: String,
}

impl From<TicketDraft> for TicketInput {
    fn from(draft: TicketDraft) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            category: Some(draft.category),
            priority: Some(draft.priority),
        }
    }
}
