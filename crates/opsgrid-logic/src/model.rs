//! Domain records for a coordination session.
//!
//! Plain data structs shared between the decision functions in this
//! crate and the session engine that owns them. Identifiers are typed
//! newtypes allocated by the owning session and resolved through its
//! id-indexed tables; a dangling id is a tolerated miss, never a fault.

use crate::roles::{ResourceKind, Role, Subsystem};
use serde::{Deserialize, Serialize};

/// Identifier of a [`GameEvent`], allocated by the owning session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EventId(pub u32);

/// Identifier of a [`ResourceUnit`], allocated by the owning session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ResourceId(pub u32);

/// Identifier of a [`ChatMessage`], allocated by the owning session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MessageId(pub u32);

/// A point in continuous 0–100 percent map space. Independent of grid
/// cell indices — the grid is a backdrop, locations are free-floating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

impl MapPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Incident severity. Declaration order is rank order, so the derived
/// `Ord` agrees with [`Severity::rank`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Ordinal rank used for feed ordering: `Critical=3 … Low=0`.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
            Severity::Critical => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

/// Lifecycle of an incident. The only permitted mutation is
/// `Pending/Active → Resolved`; events are never deleted in-session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    Pending,
    #[default]
    Active,
    Resolved,
}

/// Lifecycle of a resource unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceStatus {
    #[default]
    Available,
    Dispatched,
    Depleted,
}

/// Message urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessagePriority {
    #[default]
    Normal,
    High,
    Urgent,
}

/// Per-subsystem resource quantities an event needs. A subsystem not
/// raised above zero needs nothing; kinds outside the four subsystems
/// (coordination units) have no requirement slot at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredResources {
    #[serde(default)]
    pub traffic: u32,
    #[serde(default)]
    pub power: u32,
    #[serde(default)]
    pub emergency: u32,
    #[serde(default)]
    pub medical: u32,
}

impl RequiredResources {
    pub fn none() -> Self {
        Self::default()
    }

    /// Requirement builder, chainable per subsystem.
    pub fn with(mut self, subsystem: Subsystem, quantity: u32) -> Self {
        match subsystem {
            Subsystem::Traffic => self.traffic = quantity,
            Subsystem::Power => self.power = quantity,
            Subsystem::Emergency => self.emergency = quantity,
            Subsystem::Medical => self.medical = quantity,
        }
        self
    }

    pub fn get(&self, subsystem: Subsystem) -> u32 {
        match subsystem {
            Subsystem::Traffic => self.traffic,
            Subsystem::Power => self.power,
            Subsystem::Emergency => self.emergency,
            Subsystem::Medical => self.medical,
        }
    }

    /// Requirement for a resource kind. Kinds without a subsystem
    /// (coordination) count as zero — they are never required.
    pub fn for_kind(&self, kind: ResourceKind) -> u32 {
        kind.subsystem().map_or(0, |s| self.get(s))
    }

    pub fn total(&self) -> u32 {
        self.traffic + self.power + self.emergency + self.medical
    }
}

/// An incident in the city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: EventStatus,
    /// Where on the map the incident sits, in 0–100 percent space.
    pub location: MapPoint,
    /// Subsystems degraded by this incident.
    pub affected_systems: Vec<Subsystem>,
    /// Resource quantities needed to handle it, per subsystem.
    pub required: RequiredResources,
    /// Logical-clock stamp; monotonic in insertion order.
    pub timestamp: u64,
}

/// A dispatchable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUnit {
    pub id: ResourceId,
    pub name: String,
    pub kind: ResourceKind,
    pub quantity: u32,
    pub status: ResourceStatus,
    pub location: MapPoint,
    /// Event currently holding this unit. Set iff `status == Dispatched`.
    /// The referenced event may have resolved since assignment; that is
    /// the renderer's concern, not this core's.
    pub assigned_to: Option<EventId>,
}

/// Originator of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    Participant(Role),
    System,
}

/// Addressee of a chat message. `All` is a broadcast every participant
/// sees regardless of communication mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Receiver {
    Role(Role),
    All,
}

/// One entry in the shared message log. Immutable once sent; the log is
/// insertion-ordered and timestamps are monotonic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub receiver: Receiver,
    pub content: String,
    pub priority: MessagePriority,
    pub timestamp: u64,
}

/// A reasoning trace emitted by an automated agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentThought {
    pub agent_role: Role,
    pub content: String,
    pub timestamp: u64,
    /// Events this trace reasons about. May reference events that have
    /// resolved or were never created; lookups must tolerate misses.
    #[serde(default)]
    pub related_events: Vec<EventId>,
}

/// Subsystem health levels, 0–100. A closed record: there is no missing
/// key to default, and `Default` is the all-zero floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityStatus {
    pub overall: u8,
    pub traffic: u8,
    pub power: u8,
    pub medical: u8,
    pub emergency: u8,
}

impl CityStatus {
    pub fn level_for(&self, subsystem: Subsystem) -> u8 {
        match subsystem {
            Subsystem::Traffic => self.traffic,
            Subsystem::Power => self.power,
            Subsystem::Emergency => self.emergency,
            Subsystem::Medical => self.medical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_rank_ordering() {
        assert!(Severity::Critical.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
        // Derived Ord agrees with rank.
        assert!(Severity::Critical > Severity::Low);
    }

    #[test]
    fn required_resources_builder_and_lookup() {
        let req = RequiredResources::none()
            .with(Subsystem::Medical, 2)
            .with(Subsystem::Power, 1);
        assert_eq!(req.get(Subsystem::Medical), 2);
        assert_eq!(req.get(Subsystem::Power), 1);
        assert_eq!(req.get(Subsystem::Traffic), 0);
        assert_eq!(req.total(), 3);
    }

    #[test]
    fn coordination_kind_is_never_required() {
        let req = RequiredResources::none()
            .with(Subsystem::Traffic, 5)
            .with(Subsystem::Power, 5)
            .with(Subsystem::Emergency, 5)
            .with(Subsystem::Medical, 5);
        assert_eq!(req.for_kind(ResourceKind::Coordination), 0);
        assert_eq!(req.for_kind(ResourceKind::Medical), 5);
    }

    #[test]
    fn city_status_default_is_all_zero() {
        let status = CityStatus::default();
        for s in Subsystem::ALL {
            assert_eq!(status.level_for(s), 0);
        }
        assert_eq!(status.overall, 0);
    }
}
