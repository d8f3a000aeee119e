// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static per-route content: display names, reasoning templates and the
//! operational next steps attached to every decision.

use triage_core::{Route, TicketInput};

/// Priority labels that add the urgency clause to the reasoning.
const URGENT_PRIORITIES: &[&str] = &["Critical", "High"];

/// Fixed presentation content for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playbook {
    pub route: Route,
    pub display_name: &'static str,
    pub reasoning: &'static str,
    pub suggested_actions: [&'static str; 4],
}

const SERVICE_DESK: Playbook = Playbook {
    route: Route::ServiceDesk,
    display_name: "Service Desk",
    reasoning: "Routed to Service Desk because this appears to be a general support request or question.",
    suggested_actions: [
        "Search Knowledge Base",
        "Provide Self-Help Resources",
        "Schedule Support Call",
        "Escalate if Needed",
    ],
};

const INCIDENT: Playbook = Playbook {
    route: Route::Incident,
    display_name: "Incident Management",
    reasoning: "Routed to Incident Management because this indicates a system issue or outage requiring immediate attention.",
    suggested_actions: [
        "Assess Impact and Urgency",
        "Notify Stakeholders",
        "Begin Troubleshooting",
        "Create Communication Plan",
    ],
};

const REQUEST: Playbook = Playbook {
    route: Route::Request,
    display_name: "Request Fulfillment",
    reasoning: "Routed to Request Fulfillment because this appears to be a request for new services, software, or access.",
    suggested_actions: [
        "Check Service Catalog",
        "Verify Approvals Needed",
        "Estimate Fulfillment Time",
        "Assign to Appropriate Team",
    ],
};

const PROBLEM: Playbook = Playbook {
    route: Route::Problem,
    display_name: "Problem Management",
    reasoning: "Routed to Problem Management because this suggests a recurring issue that needs root cause analysis.",
    suggested_actions: [
        "Gather Related Incidents",
        "Perform Root Cause Analysis",
        "Identify Patterns",
        "Develop Permanent Solution",
    ],
};

const CHANGE: Playbook = Playbook {
    route: Route::Change,
    display_name: "Change Management",
    reasoning: "Routed to Change Management because this involves system changes, updates, or scheduled maintenance.",
    suggested_actions: [
        "Assess Change Impact",
        "Schedule Change Window",
        "Prepare Rollback Plan",
        "Get Change Approval",
    ],
};

/// Playbook for a route.
pub fn playbook(route: Route) -> &'static Playbook {
    match route {
        Route::ServiceDesk => &SERVICE_DESK,
        Route::Incident => &INCIDENT,
        Route::Request => &REQUEST,
        Route::Problem => &PROBLEM,
        Route::Change => &CHANGE,
    }
}

/// Reasoning text for routing `ticket` to `route`.
///
/// The route's template, followed by a category clause when the ticket has a
/// non-empty category, and an urgency clause for Critical/High priority.
pub fn reasoning(route: Route, ticket: &TicketInput) -> String {
    let mut text = playbook(route).reasoning.to_string();

    if let Some(category) = ticket.category.as_deref().filter(|c| !c.is_empty()) {
        text.push_str(&format!(
            " Category \"{category}\" also supports this routing decision."
        ));
    }

    if ticket
        .priority
        .as_deref()
        .is_some_and(|p| URGENT_PRIORITIES.contains(&p))
    {
        text.push_str(" High priority level indicates urgent attention is needed.");
    }

    text
}

/// Owned copy of the route's suggested actions, in order.
pub fn suggested_actions(route: Route) -> Vec<String> {
    playbook(route)
        .suggested_actions
        .iter()
        .map(|a| a.to_string())
        .collect()
}
