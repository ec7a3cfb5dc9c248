//! Subsystem tags, participant roles, and resource kinds.
//!
//! These three closed enums drive every filtering component: the same
//! four subsystem tags name event categories, resource categories, and
//! the non-coordinator roles, so the match rules below are exhaustive
//! instead of falling through string defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

/// City subsystem affected by incidents and served by resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subsystem {
    Traffic,
    Power,
    Emergency,
    Medical,
}

impl Subsystem {
    /// All subsystem tags, in canonical order.
    pub const ALL: [Subsystem; 4] = [
        Subsystem::Traffic,
        Subsystem::Power,
        Subsystem::Emergency,
        Subsystem::Medical,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Subsystem::Traffic => "Traffic",
            Subsystem::Power => "Power",
            Subsystem::Emergency => "Emergency",
            Subsystem::Medical => "Medical",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Participant role: one of the four subsystem roles or the coordinator.
///
/// The role determines what a participant sees (resources, status
/// metrics), whom they may message, and which resources they may
/// dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Traffic,
    Power,
    Emergency,
    Medical,
    Coordinator,
}

impl Role {
    /// All roles, subsystem roles first.
    pub const ALL: [Role; 5] = [
        Role::Traffic,
        Role::Power,
        Role::Emergency,
        Role::Medical,
        Role::Coordinator,
    ];

    /// The subsystem this role is responsible for; `None` for the
    /// coordinator, who oversees all of them.
    pub fn subsystem(&self) -> Option<Subsystem> {
        match self {
            Role::Traffic => Some(Subsystem::Traffic),
            Role::Power => Some(Subsystem::Power),
            Role::Emergency => Some(Subsystem::Emergency),
            Role::Medical => Some(Subsystem::Medical),
            Role::Coordinator => None,
        }
    }

    /// The role responsible for a subsystem.
    pub fn for_subsystem(subsystem: Subsystem) -> Role {
        match subsystem {
            Subsystem::Traffic => Role::Traffic,
            Subsystem::Power => Role::Power,
            Subsystem::Emergency => Role::Emergency,
            Subsystem::Medical => Role::Medical,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Coordinator => "Coordinator",
            _ => self.subsystem().map(|s| s.label()).unwrap_or("Coordinator"),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category of a dispatchable resource: one per subsystem, plus shared
/// coordination units (mobile command posts and the like) that every
/// role may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Traffic,
    Power,
    Emergency,
    Medical,
    Coordination,
}

impl ResourceKind {
    /// The subsystem this kind serves; `None` for coordination units,
    /// which belong to no single subsystem.
    pub fn subsystem(&self) -> Option<Subsystem> {
        match self {
            ResourceKind::Traffic => Some(Subsystem::Traffic),
            ResourceKind::Power => Some(Subsystem::Power),
            ResourceKind::Emergency => Some(Subsystem::Emergency),
            ResourceKind::Medical => Some(Subsystem::Medical),
            ResourceKind::Coordination => None,
        }
    }

    /// Kind/role match shared by the visibility filter and the dispatch
    /// matcher: a kind matches the role of its own subsystem, and
    /// coordination units match every role.
    pub fn matches_role(&self, role: Role) -> bool {
        match self {
            ResourceKind::Coordination => true,
            _ => self.subsystem() == role.subsystem(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Coordination => "Coordination",
            _ => self.subsystem().map(|s| s.label()).unwrap_or("Coordination"),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
