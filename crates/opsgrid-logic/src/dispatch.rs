//! Resource-to-event dispatch matching.
//!
//! [`eligible_resources`] computes the assignable set for a selected
//! event and acting role. [`validate_dispatch`] re-checks one concrete
//! intent against current state and returns a typed rejection on
//! failure. Neither function mutates anything — the owning session
//! applies the assignment only after a successful validation, in the
//! same logical transaction, so two intents racing for one resource end
//! with exactly one holder and one reported no-op.

use crate::model::{EventStatus, GameEvent, ResourceStatus, ResourceUnit};
use crate::roles::Role;
use serde::{Deserialize, Serialize};

/// Why a dispatch intent was refused. A rejection is a value, never a
/// fault; the caller reports it and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchRejection {
    /// The resource is already dispatched or depleted.
    ResourceUnavailable,
    /// The acting role may not operate resources of this kind.
    RoleMismatch,
    /// The event does not require this kind of resource.
    NotRequired,
    /// The target event is not active.
    EventNotActive,
}

impl DispatchRejection {
    pub fn reason(&self) -> &'static str {
        match self {
            DispatchRejection::ResourceUnavailable => "resource is not available",
            DispatchRejection::RoleMismatch => "role cannot operate this resource kind",
            DispatchRejection::NotRequired => "event does not require this resource kind",
            DispatchRejection::EventNotActive => "event is not active",
        }
    }
}

/// The three eligibility predicates: available, kind matches the acting
/// role, and the event actually requires this kind (a kind the event
/// does not list counts as required-zero and is excluded).
pub fn is_eligible(resource: &ResourceUnit, event: &GameEvent, role: Role) -> bool {
    resource.status == ResourceStatus::Available
        && resource.kind.matches_role(role)
        && event.required.for_kind(resource.kind) > 0
}

/// Assignable subset of `resources` for `event` under `role`.
pub fn eligible_resources<'a>(
    resources: &'a [ResourceUnit],
    event: &GameEvent,
    role: Role,
) -> Vec<&'a ResourceUnit> {
    resources
        .iter()
        .filter(|r| is_eligible(r, event, role))
        .collect()
}

/// Re-validate a concrete dispatch intent against current state: the
/// three eligibility predicates plus an active target event. `Ok` means
/// the owning session may apply `status = Dispatched` and the
/// back-reference; any `Err` means apply nothing.
pub fn validate_dispatch(
    resource: &ResourceUnit,
    event: &GameEvent,
    role: Role,
) -> Result<(), DispatchRejection> {
    if resource.status != ResourceStatus::Available {
        return Err(DispatchRejection::ResourceUnavailable);
    }
    if !resource.kind.matches_role(role) {
        return Err(DispatchRejection::RoleMismatch);
    }
    if event.required.for_kind(resource.kind) == 0 {
        return Err(DispatchRejection::NotRequired);
    }
    if event.status != EventStatus::Active {
        return Err(DispatchRejection::EventNotActive);
    }
    Ok(())
}
