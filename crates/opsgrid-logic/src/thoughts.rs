//! Views over the agent reasoning-trace log.
//!
//! The log itself is an append-only sequence owned by the session;
//! growth is unbounded and no eviction exists. Rendering order is strict
//! most-recent-first via a full reversal of the stored sequence — not a
//! sort, so entries with equal timestamps come out in inverted insertion
//! order.

use crate::model::{AgentThought, EventId, GameEvent};

/// Title shown when a trace references an event the session no longer
/// knows (resolved out of view, or never created).
pub const UNKNOWN_EVENT_TITLE: &str = "unknown event";

/// Most-recent-first view over the stored sequence.
pub fn recent_first(thoughts: &[AgentThought]) -> impl Iterator<Item = &AgentThought> {
    thoughts.iter().rev()
}

/// Title of a referenced event; a miss resolves to
/// [`UNKNOWN_EVENT_TITLE`] rather than failing.
pub fn related_event_title(events: &[GameEvent], id: EventId) -> &str {
    events
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.title.as_str())
        .unwrap_or(UNKNOWN_EVENT_TITLE)
}

/// Resolved titles for every event a trace references, misses included
/// as placeholders so the row count matches the reference count.
pub fn related_event_titles<'a>(events: &'a [GameEvent], thought: &AgentThought) -> Vec<&'a str> {
    thought
        .related_events
        .iter()
        .map(|&id| related_event_title(events, id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MapPoint, RequiredResources, Severity, EventStatus};
    use crate::roles::Role;

    fn thought(content: &str, timestamp: u64, related: Vec<EventId>) -> AgentThought {
        AgentThought {
            agent_role: Role::Power,
            content: content.into(),
            timestamp,
            related_events: related,
        }
    }

    fn event(id: u32, title: &str) -> GameEvent {
        GameEvent {
            id: EventId(id),
            title: title.into(),
            description: String::new(),
            severity: Severity::Medium,
            status: EventStatus::Active,
            location: MapPoint::default(),
            affected_systems: Vec::new(),
            required: RequiredResources::none(),
            timestamp: 1,
        }
    }

    #[test]
    fn view_is_reverse_insertion_order() {
        let log = vec![
            thought("first", 1, vec![]),
            thought("second", 2, vec![]),
            thought("third", 3, vec![]),
        ];
        let contents: Vec<&str> = recent_first(&log).map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["third", "second", "first"]);
    }

    #[test]
    fn equal_timestamps_invert_insertion_order() {
        // Reversal, not a sort: same-stamp entries flip too.
        let log = vec![thought("a", 5, vec![]), thought("b", 5, vec![])];
        let contents: Vec<&str> = recent_first(&log).map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["b", "a"]);
    }

    #[test]
    fn related_lookup_tolerates_misses() {
        let events = vec![event(1, "Substation overload")];
        let t = thought("rerouting", 1, vec![EventId(1), EventId(99)]);
        let titles = related_event_titles(&events, &t);
        assert_eq!(titles, vec!["Substation overload", UNKNOWN_EVENT_TITLE]);
    }
}
