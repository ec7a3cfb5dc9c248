//! Role-scoped visibility of resources and status metrics.
//!
//! Both functions are total: every role gets an answer, and an
//! unprivileged role degrades to the minimal view rather than an error.

use crate::model::{CityStatus, ResourceUnit};
use crate::roles::{Role, Subsystem};
use serde::{Deserialize, Serialize};

/// Resources a participant may see. The coordinator sees the full pool
/// unchanged; a subsystem role sees its own resources plus shared
/// coordination units.
pub fn visible_resources(resources: &[ResourceUnit], role: Role) -> Vec<&ResourceUnit> {
    match role {
        Role::Coordinator => resources.iter().collect(),
        _ => resources
            .iter()
            .filter(|r| r.kind.matches_role(role))
            .collect(),
    }
}

/// Status metrics as one role sees them: the overall level plus the
/// subsystem levels that role is entitled to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub overall: u8,
    /// Per-subsystem levels, in canonical subsystem order. One entry for
    /// a subsystem role, all four for the coordinator.
    pub subsystems: Vec<(Subsystem, u8)>,
}

/// Project the city status down to what `role` may see.
pub fn visible_status(status: &CityStatus, role: Role) -> StatusView {
    let subsystems = match role.subsystem() {
        None => Subsystem::ALL
            .iter()
            .map(|&s| (s, status.level_for(s)))
            .collect(),
        Some(own) => vec![(own, status.level_for(own))],
    };
    StatusView {
        overall: status.overall,
        subsystems,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MapPoint, ResourceId, ResourceStatus};
    use crate::roles::ResourceKind;

    fn unit(id: u32, kind: ResourceKind) -> ResourceUnit {
        ResourceUnit {
            id: ResourceId(id),
            name: format!("unit-{id}"),
            kind,
            quantity: 1,
            status: ResourceStatus::Available,
            location: MapPoint::new(50.0, 50.0),
            assigned_to: None,
        }
    }

    #[test]
    fn coordinator_sees_everything_unchanged() {
        let pool = vec![
            unit(1, ResourceKind::Power),
            unit(2, ResourceKind::Medical),
            unit(3, ResourceKind::Traffic),
            unit(4, ResourceKind::Coordination),
        ];
        let seen = visible_resources(&pool, Role::Coordinator);
        assert_eq!(seen.len(), pool.len());
        for (seen, original) in seen.iter().zip(&pool) {
            assert_eq!(seen.id, original.id);
        }
    }

    #[test]
    fn subsystem_role_sees_own_kind_plus_coordination() {
        let pool = vec![
            unit(1, ResourceKind::Power),
            unit(2, ResourceKind::Medical),
            unit(3, ResourceKind::Coordination),
        ];
        let seen = visible_resources(&pool, Role::Medical);
        let ids: Vec<u32> = seen.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn status_view_for_coordinator_is_complete() {
        let status = CityStatus {
            overall: 80,
            traffic: 70,
            power: 60,
            medical: 90,
            emergency: 85,
        };
        let view = visible_status(&status, Role::Coordinator);
        assert_eq!(view.overall, 80);
        assert_eq!(view.subsystems.len(), 4);
        assert!(view.subsystems.contains(&(Subsystem::Power, 60)));
    }

    #[test]
    fn status_view_for_subsystem_role_is_minimal() {
        let status = CityStatus {
            overall: 80,
            traffic: 70,
            power: 60,
            medical: 90,
            emergency: 85,
        };
        let view = visible_status(&status, Role::Power);
        assert_eq!(view.overall, 80);
        assert_eq!(view.subsystems, vec![(Subsystem::Power, 60)]);
    }

    #[test]
    fn zeroed_status_still_answers() {
        let view = visible_status(&CityStatus::default(), Role::Traffic);
        assert_eq!(view.overall, 0);
        assert_eq!(view.subsystems, vec![(Subsystem::Traffic, 0)]);
    }
}
