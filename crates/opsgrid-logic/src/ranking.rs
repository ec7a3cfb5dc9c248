//! Event feed filtering and ordering.

use crate::model::{EventStatus, GameEvent};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Feed status filter. `All` passes everything; the others keep only the
/// matching status (pending events appear only under `All`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Resolved,
}

/// Feed ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    Severity,
}

/// Events passing the status filter, input order preserved.
pub fn filter_events(events: &[GameEvent], filter: StatusFilter) -> Vec<&GameEvent> {
    events
        .iter()
        .filter(|e| match filter {
            StatusFilter::All => true,
            StatusFilter::Active => e.status == EventStatus::Active,
            StatusFilter::Resolved => e.status == EventStatus::Resolved,
        })
        .collect()
}

/// Order a feed view in place. All orders use stable sorts, so ties keep
/// their input order — severity ties in particular are not re-broken by
/// recency.
pub fn sort_events(events: &mut [&GameEvent], order: SortOrder) {
    match order {
        SortOrder::Newest => events.sort_by_key(|e| Reverse(e.timestamp)),
        SortOrder::Oldest => events.sort_by_key(|e| e.timestamp),
        SortOrder::Severity => events.sort_by_key(|e| Reverse(e.severity.rank())),
    }
}

/// Filter and order in one pass — the shape the feed view consumes.
pub fn feed(events: &[GameEvent], filter: StatusFilter, order: SortOrder) -> Vec<&GameEvent> {
    let mut view = filter_events(events, filter);
    sort_events(&mut view, order);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventId, MapPoint, RequiredResources, Severity};

    fn event(id: u32, severity: Severity, status: EventStatus, timestamp: u64) -> GameEvent {
        GameEvent {
            id: EventId(id),
            title: format!("event-{id}"),
            description: String::new(),
            severity,
            status,
            location: MapPoint::default(),
            affected_systems: Vec::new(),
            required: RequiredResources::none(),
            timestamp,
        }
    }

    #[test]
    fn status_filter_keeps_matching_only() {
        let events = vec![
            event(1, Severity::Low, EventStatus::Pending, 1),
            event(2, Severity::Low, EventStatus::Active, 2),
            event(3, Severity::Low, EventStatus::Resolved, 3),
        ];
        assert_eq!(filter_events(&events, StatusFilter::All).len(), 3);

        let active: Vec<u32> = filter_events(&events, StatusFilter::Active)
            .iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(active, vec![2]);

        let resolved: Vec<u32> = filter_events(&events, StatusFilter::Resolved)
            .iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(resolved, vec![3]);
    }

    #[test]
    fn severity_order_is_descending_rank() {
        let events = vec![
            event(1, Severity::Low, EventStatus::Active, 1),
            event(2, Severity::Critical, EventStatus::Active, 2),
            event(3, Severity::Medium, EventStatus::Active, 3),
            event(4, Severity::High, EventStatus::Active, 4),
        ];
        let ordered: Vec<Severity> = feed(&events, StatusFilter::All, SortOrder::Severity)
            .iter()
            .map(|e| e.severity)
            .collect();
        assert_eq!(
            ordered,
            vec![
                Severity::Critical,
                Severity::High,
                Severity::Medium,
                Severity::Low
            ]
        );
    }

    #[test]
    fn severity_ties_keep_input_order() {
        let events = vec![
            event(1, Severity::High, EventStatus::Active, 9),
            event(2, Severity::High, EventStatus::Active, 3),
            event(3, Severity::High, EventStatus::Active, 7),
        ];
        let ids: Vec<u32> = feed(&events, StatusFilter::All, SortOrder::Severity)
            .iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn newest_and_oldest_orders() {
        let events = vec![
            event(1, Severity::Low, EventStatus::Active, 5),
            event(2, Severity::Low, EventStatus::Active, 9),
            event(3, Severity::Low, EventStatus::Active, 1),
        ];
        let newest: Vec<u32> = feed(&events, StatusFilter::All, SortOrder::Newest)
            .iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(newest, vec![2, 1, 3]);

        let oldest: Vec<u32> = feed(&events, StatusFilter::All, SortOrder::Oldest)
            .iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(oldest, vec![3, 1, 2]);
    }
}
