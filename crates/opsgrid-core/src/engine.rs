//! The session engine — owning store behind the decision layer.
//!
//! Events and resources live as entities in an `hecs` world, reached
//! through id-indexed tables; messages and thoughts are append-only
//! logs. Single-threaded and event-driven: each intent runs to
//! completion against current state, and dispatch re-validates its
//! eligibility predicates in the same logical transaction as the write,
//! so two intents racing for one resource leave exactly one holder.

use std::collections::HashMap;

use hecs::{Entity, World};

use opsgrid_logic::comms::{self, CommunicationMode};
use opsgrid_logic::dispatch::{self, DispatchRejection};
use opsgrid_logic::model::{
    AgentThought, ChatMessage, CityStatus, EventId, EventStatus, GameEvent, MessageId,
    MessagePriority, Receiver, ResourceId, ResourceStatus, ResourceUnit, Sender,
};
use opsgrid_logic::ranking::{self, SortOrder, StatusFilter};
use opsgrid_logic::roles::Role;
use opsgrid_logic::thoughts;
use opsgrid_logic::visibility::{self, StatusView};

use crate::scenario::{EventSpec, ResourceSpec, Scenario};

/// Outcome of a dispatch intent. Rejection is a value: the losing side
/// of a racing pair gets `Rejected`, never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Dispatched,
    Rejected(DispatchRejection),
    UnknownResource,
    UnknownEvent,
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Dispatched)
    }
}

/// One participant's session over the shared coordination state.
pub struct SessionEngine {
    world: World,
    events_by_id: HashMap<EventId, Entity>,
    resources_by_id: HashMap<ResourceId, Entity>,
    /// Shared log; every participant reads the same entries through the
    /// per-render visibility predicate.
    messages: Vec<ChatMessage>,
    thoughts: Vec<AgentThought>,
    city_status: CityStatus,
    team_members: Vec<Role>,
    communication_mode: CommunicationMode,
    participant_role: Role,
    selected_event: Option<EventId>,
    selected_resource: Option<ResourceId>,
    next_event_id: u32,
    next_resource_id: u32,
    next_message_id: u32,
    /// Logical clock; strictly increasing across every stamped record.
    clock: u64,
}

impl SessionEngine {
    pub fn new(participant_role: Role) -> Self {
        Self {
            world: World::new(),
            events_by_id: HashMap::new(),
            resources_by_id: HashMap::new(),
            messages: Vec::new(),
            thoughts: Vec::new(),
            city_status: CityStatus::default(),
            team_members: Role::ALL.to_vec(),
            communication_mode: CommunicationMode::default(),
            participant_role,
            selected_event: None,
            selected_resource: None,
            next_event_id: 1,
            next_resource_id: 1,
            next_message_id: 1,
            clock: 0,
        }
    }

    /// Build a session from a scenario bundle.
    pub fn from_scenario(scenario: Scenario, participant_role: Role) -> Self {
        let mut engine = Self::new(participant_role);
        engine.city_status = scenario.city_status;
        engine.team_members = scenario.team_members;
        engine.communication_mode = scenario.communication_mode;
        for spec in scenario.events {
            engine.insert_event(spec);
        }
        for spec in scenario.resources {
            engine.insert_resource(spec);
        }
        log::info!(
            "session loaded: {} events, {} resources, role {}",
            engine.events_by_id.len(),
            engine.resources_by_id.len(),
            engine.participant_role
        );
        engine
    }

    fn tick_clock(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    // ── Store population ────────────────────────────────────────────────

    /// Register a new incident; the engine assigns its id and timestamp.
    pub fn insert_event(&mut self, spec: EventSpec) -> EventId {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        let timestamp = self.tick_clock();
        let event = GameEvent {
            id,
            title: spec.title,
            description: spec.description,
            severity: spec.severity,
            status: spec.status,
            location: spec.location,
            affected_systems: spec.affected_systems,
            required: spec.required,
            timestamp,
        };
        let entity = self.world.spawn((event,));
        self.events_by_id.insert(id, entity);
        id
    }

    /// Register a new resource unit. Fresh units are never dispatched: a
    /// spec claiming `Dispatched` has no event to back the reference and
    /// is coerced to `Available`.
    pub fn insert_resource(&mut self, spec: ResourceSpec) -> ResourceId {
        let id = ResourceId(self.next_resource_id);
        self.next_resource_id += 1;
        let status = match spec.status {
            ResourceStatus::Dispatched => {
                log::warn!("resource spec '{}' claims Dispatched; coerced", spec.name);
                ResourceStatus::Available
            }
            other => other,
        };
        let unit = ResourceUnit {
            id,
            name: spec.name,
            kind: spec.kind,
            quantity: spec.quantity,
            status,
            location: spec.location,
            assigned_to: None,
        };
        let entity = self.world.spawn((unit,));
        self.resources_by_id.insert(id, entity);
        id
    }

    // ── Read access ─────────────────────────────────────────────────────

    pub fn participant_role(&self) -> Role {
        self.participant_role
    }

    pub fn team_members(&self) -> &[Role] {
        &self.team_members
    }

    pub fn communication_mode(&self) -> CommunicationMode {
        self.communication_mode
    }

    pub fn set_communication_mode(&mut self, mode: CommunicationMode) {
        self.communication_mode = mode;
    }

    pub fn city_status(&self) -> CityStatus {
        self.city_status
    }

    pub fn set_city_status(&mut self, status: CityStatus) {
        self.city_status = status;
    }

    pub fn selected_event(&self) -> Option<EventId> {
        self.selected_event
    }

    pub fn selected_resource(&self) -> Option<ResourceId> {
        self.selected_resource
    }

    /// All events, insertion-ordered.
    pub fn events(&self) -> Vec<GameEvent> {
        let mut events: Vec<GameEvent> = self
            .world
            .query::<&GameEvent>()
            .iter()
            .map(|(_, e)| e.clone())
            .collect();
        events.sort_by_key(|e| e.id);
        events
    }

    /// All resources, insertion-ordered.
    pub fn resources(&self) -> Vec<ResourceUnit> {
        let mut resources: Vec<ResourceUnit> = self
            .world
            .query::<&ResourceUnit>()
            .iter()
            .map(|(_, r)| r.clone())
            .collect();
        resources.sort_by_key(|r| r.id);
        resources
    }

    /// Event by id; a miss is `None`, never a fault.
    pub fn event(&self, id: EventId) -> Option<GameEvent> {
        let entity = *self.events_by_id.get(&id)?;
        self.world
            .get::<&GameEvent>(entity)
            .ok()
            .map(|e| (*e).clone())
    }

    /// Resource by id; a miss is `None`, never a fault.
    pub fn resource(&self, id: ResourceId) -> Option<ResourceUnit> {
        let entity = *self.resources_by_id.get(&id)?;
        self.world
            .get::<&ResourceUnit>(entity)
            .ok()
            .map(|r| (*r).clone())
    }

    // ── Filtered views ──────────────────────────────────────────────────

    /// The event feed as the participant sees it.
    pub fn event_feed(&self, filter: StatusFilter, order: SortOrder) -> Vec<GameEvent> {
        let events = self.events();
        ranking::feed(&events, filter, order)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Resources visible to the participant's role.
    pub fn visible_resources(&self) -> Vec<ResourceUnit> {
        let resources = self.resources();
        visibility::visible_resources(&resources, self.participant_role)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Resources the participant could dispatch to `event_id` right now.
    /// An unknown event yields the empty set.
    pub fn eligible_for(&self, event_id: EventId) -> Vec<ResourceId> {
        let Some(event) = self.event(event_id) else {
            return Vec::new();
        };
        let resources = self.resources();
        dispatch::eligible_resources(&resources, &event, self.participant_role)
            .iter()
            .map(|r| r.id)
            .collect()
    }

    /// Status metrics the participant may see.
    pub fn visible_status(&self) -> StatusView {
        visibility::visible_status(&self.city_status, self.participant_role)
    }

    /// Direct receivers the participant may address right now.
    pub fn allowed_receivers(&self) -> Vec<Role> {
        comms::allowed_receivers(
            self.participant_role,
            self.communication_mode,
            &self.team_members,
        )
    }

    /// The participant's transcript over the shared log.
    pub fn transcript(&self) -> Vec<&ChatMessage> {
        comms::transcript(&self.messages, self.participant_role)
    }

    /// Agent traces, most recent first.
    pub fn recent_thoughts(&self) -> Vec<&AgentThought> {
        thoughts::recent_first(&self.thoughts).collect()
    }

    /// Resolved titles for the events a trace references; unknown ids
    /// come back as placeholders.
    pub fn related_titles(&self, thought: &AgentThought) -> Vec<String> {
        let events = self.events();
        thoughts::related_event_titles(&events, thought)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    // ── Intents ─────────────────────────────────────────────────────────

    /// Select an event for inspection; an unknown id clears the
    /// selection instead of failing.
    pub fn select_event(&mut self, id: Option<EventId>) {
        self.selected_event = id.filter(|id| self.events_by_id.contains_key(id));
    }

    /// Select a resource; an unknown id clears the selection.
    pub fn select_resource(&mut self, id: Option<ResourceId>) {
        self.selected_resource = id.filter(|id| self.resources_by_id.contains_key(id));
    }

    /// Dispatch a resource to an event. Eligibility is re-validated
    /// against current state atomically with the write; on any failure
    /// nothing changes and the outcome reports why.
    pub fn dispatch_resource(
        &mut self,
        resource_id: ResourceId,
        event_id: EventId,
    ) -> DispatchOutcome {
        let Some(&resource_entity) = self.resources_by_id.get(&resource_id) else {
            log::warn!("dispatch: unknown resource {resource_id:?}");
            return DispatchOutcome::UnknownResource;
        };
        let Some(&event_entity) = self.events_by_id.get(&event_id) else {
            log::warn!("dispatch: unknown event {event_id:?}");
            return DispatchOutcome::UnknownEvent;
        };
        let Ok(event) = self.world.get::<&GameEvent>(event_entity) else {
            return DispatchOutcome::UnknownEvent;
        };
        let Ok(mut resource) = self.world.get::<&mut ResourceUnit>(resource_entity) else {
            return DispatchOutcome::UnknownResource;
        };

        match dispatch::validate_dispatch(&resource, &event, self.participant_role) {
            Ok(()) => {
                resource.status = ResourceStatus::Dispatched;
                resource.assigned_to = Some(event_id);
                log::info!("dispatched '{}' to '{}'", resource.name, event.title);
                DispatchOutcome::Dispatched
            }
            Err(rejection) => {
                log::warn!(
                    "dispatch of '{}' to '{}' rejected: {}",
                    resource.name,
                    event.title,
                    rejection.reason()
                );
                DispatchOutcome::Rejected(rejection)
            }
        }
    }

    /// Send a message as the participant. The engine stamps the sender,
    /// id, and the next logical timestamp.
    pub fn send_message(
        &mut self,
        content: impl Into<String>,
        receiver: Receiver,
        priority: MessagePriority,
    ) -> MessageId {
        self.push_message(
            Sender::Participant(self.participant_role),
            receiver,
            content.into(),
            priority,
        )
    }

    /// Broadcast a system announcement.
    pub fn post_system_message(
        &mut self,
        content: impl Into<String>,
        priority: MessagePriority,
    ) -> MessageId {
        self.push_message(Sender::System, Receiver::All, content.into(), priority)
    }

    fn push_message(
        &mut self,
        sender: Sender,
        receiver: Receiver,
        content: String,
        priority: MessagePriority,
    ) -> MessageId {
        let id = MessageId(self.next_message_id);
        self.next_message_id += 1;
        let timestamp = self.tick_clock();
        self.messages.push(ChatMessage {
            id,
            sender,
            receiver,
            content,
            priority,
            timestamp,
        });
        id
    }

    /// Append an agent reasoning trace.
    pub fn post_thought(&mut self, agent_role: Role, content: impl Into<String>, related_events: Vec<EventId>) {
        let timestamp = self.tick_clock();
        self.thoughts.push(AgentThought {
            agent_role,
            content: content.into(),
            timestamp,
            related_events,
        });
    }

    /// The only event mutation: `Pending/Active → Resolved`. Returns
    /// whether a transition happened; resolving an unknown or
    /// already-resolved event is a reported no-op. Resources dispatched
    /// to the event stay dispatched.
    pub fn resolve_event(&mut self, id: EventId) -> bool {
        let Some(&entity) = self.events_by_id.get(&id) else {
            log::warn!("resolve: unknown event {id:?}");
            return false;
        };
        let Ok(mut event) = self.world.get::<&mut GameEvent>(entity) else {
            return false;
        };
        match event.status {
            EventStatus::Pending | EventStatus::Active => {
                event.status = EventStatus::Resolved;
                log::info!("event '{}' resolved", event.title);
                true
            }
            EventStatus::Resolved => false,
        }
    }

    /// Store-wide invariant: a resource is dispatched iff it references
    /// an event.
    pub fn assignment_invariants_hold(&self) -> bool {
        self.resources()
            .iter()
            .all(|r| (r.status == ResourceStatus::Dispatched) == r.assigned_to.is_some())
    }
}
