// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket classification and routing for the ITSM console.
//!
//! This crate provides:
//! - [`RuleSet`]: the compiled, immutable rule table (keywords, patterns, metadata maps)
//! - [`route_ticket`]: the pure scoring and selection function
//! - [`TicketRouter`]: a cheap-to-clone holder of a rule set with batch statistics
//!   and a feedback hook
//! - [`draft_ticket`]: pre-filling a ticket from support chat text
//!
//! Routing is synchronous and side-effect free. A router can be shared across
//! threads without locking.

pub mod classifier;
pub mod draft;
pub mod playbook;
pub mod router;
pub mod rules;

pub use classifier::{route_ticket, score_ticket, select_route, RouteScore};
pub use draft::draft_ticket;
pub use playbook::{playbook, Playbook};
pub use router::TicketRouter;
pub use rules::{RoutingRule, RuleSet};
