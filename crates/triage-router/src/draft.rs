// SPDX-FileCopyrightText: 2026 Triage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pre-filling a ticket from free-form support chat text.
//!
//! The first matching cue decides the title prefix and category; the title
//! carries the first few words of the conversation so agents can scan a
//! queue quickly.

use triage_core::TicketDraft;

const TITLE_WORDS: usize = 5;
const MAX_TITLE_CHARS: usize = 100;
const MAX_DESCRIPTION_CHARS: usize = 500;
const DEFAULT_PRIORITY: &str = "Medium";

struct DraftCue {
    terms: &'static [&'static str],
    title_prefix: &'static str,
    category: &'static str,
    priority: Option<&'static str>,
}

/// Checked in order; the first cue with any matching term wins.
const CUES: &[DraftCue] = &[
    DraftCue {
        terms: &["email", "outlook"],
        title_prefix: "Email Issue - ",
        category: "Email",
        priority: None,
    },
    DraftCue {
        terms: &["password", "login"],
        title_prefix: "Access Issue - ",
        category: "Access",
        priority: None,
    },
    DraftCue {
        terms: &["software", "install"],
        title_prefix: "Software Request - ",
        category: "Software",
        priority: None,
    },
    DraftCue {
        terms: &["network", "internet"],
        title_prefix: "Network Issue - ",
        category: "Network",
        priority: Some("High"),
    },
];

const GENERIC_PREFIX: &str = "Support Request - ";
const GENERIC_CATEGORY: &str = "Other";

/// Build a ticket draft from a support conversation.
///
/// Returns `None` for an empty or whitespace-only conversation.
pub fn draft_ticket(conversation: &str) -> Option<TicketDraft> {
    if conversation.trim().is_empty() {
        return None;
    }

    let lower = conversation.to_lowercase();
    let cue = CUES
        .iter()
        .find(|cue| cue.terms.iter().any(|t| lower.contains(t)));

    let (prefix, category, priority) = match cue {
        Some(cue) => (
            cue.title_prefix,
            cue.category,
            cue.priority.unwrap_or(DEFAULT_PRIORITY),
        ),
        None => (GENERIC_PREFIX, GENERIC_CATEGORY, DEFAULT_PRIORITY),
    };

    let lead = conversation
        .split_whitespace()
        .take(TITLE_WORDS)
        .collect::<Vec<_>>()
        .join(" ");

    Some(TicketDraft {
        title: truncate_chars(&format!("{prefix}{lead}"), MAX_TITLE_CHARS),
        description: truncate_chars(conversation, MAX_DESCRIPTION_CHARS),
        priority: priority.to_string(),
        category: category.to_string(),
    })
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use triage_core::{Route, TicketInput};

    use super::*;
    use crate::router::TicketRouter;

    #[test]
    fn empty_conversation_has_no_draft() {
        assert!(draft_ticket("").is_none());
        assert!(draft_ticket("  \n\t").is_none());
    }

    #[test]
    fn email_cue() {
        let draft = draft_ticket("My Outlook keeps asking for my password").unwrap();
        // email is checked before password
        assert_eq!(draft.category, "Email");
        assert_eq!(draft.title, "Email Issue - My Outlook keeps asking for");
        assert_eq!(draft.priority, "Medium");
    }

    #[test]
    fn access_cue() {
        let draft = draft_ticket("cannot login to the portal").unwrap();
        assert_eq!(draft.category, "Access");
        assert_eq!(draft.title, "Access Issue - cannot login to the portal");
    }

    #[test]
    fn software_cue() {
        let draft = draft_ticket("please install Visual Studio Code").unwrap();
        assert_eq!(draft.category, "Software");
        assert!(draft.title.starts_with("Software Request - "));
    }

    #[test]
    fn network_cue_raises_priority() {
        let draft = draft_ticket("The internet is really slow on floor 3").unwrap();
        assert_eq!(draft.category, "Network");
        assert_eq!(draft.priority, "High");
    }

    #[test]
    fn generic_fallback() {
        let draft = draft_ticket("my chair is broken").unwrap();
        assert_eq!(draft.category, "Other");
        assert_eq!(draft.title, "Support Request - my chair is broken");
        assert_eq!(draft.description, "my chair is broken");
    }

    #[test]
    fn long_text_is_truncated_by_characters() {
        let word = "é".repeat(40);
        let conversation = vec![word.as_str(); 20].join(" ");
        let draft = draft_ticket(&conversation).unwrap();
        assert_eq!(draft.title.chars().count(), 100);
        assert_eq!(draft.description.chars().count(), 500);
    }

    #[test]
    fn network_draft_routes_to_incident() {
        let draft = draft_ticket("network outage in building B").unwrap();
        let decision = TicketRouter::default().route(&TicketInput::from(draft));
        assert_eq!(decision.recommended_agent, Route::Incident);
        assert!(decision.auto_route);
    }
}
