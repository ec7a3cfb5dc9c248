//! Message routing and transcript visibility.
//!
//! All participants share one message log. Routing decides whom a role
//! may address when composing; visibility decides which entries a
//! viewer's transcript contains. Visibility is evaluated per render,
//! never per delivery — a message is not copied to inboxes.

use crate::model::{ChatMessage, Receiver, Sender};
use crate::roles::Role;
use serde::{Deserialize, Serialize};

/// How direct messages may be addressed in a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommunicationMode {
    /// Subsystem roles may only address the coordinator; the coordinator
    /// may address anyone.
    #[default]
    Hierarchical,
    /// No routing restriction is modeled at this layer: the receiver
    /// list is the whole team. Whether "limited" was meant to restrict
    /// more than that is unresolved in the observed behavior; nothing
    /// here or at send time enforces anything further.
    Limited,
}

/// Direct receivers `role` may address under `mode`. Broadcast
/// ([`Receiver::All`]) is always selectable on top of this list,
/// whatever the mode.
pub fn allowed_receivers(role: Role, mode: CommunicationMode, team_members: &[Role]) -> Vec<Role> {
    match (mode, role) {
        (CommunicationMode::Hierarchical, Role::Coordinator) => team_members.to_vec(),
        (CommunicationMode::Hierarchical, _) => vec![Role::Coordinator],
        (CommunicationMode::Limited, _) => team_members.to_vec(),
    }
}

/// Whether `viewer` sees `message` in their transcript: addressed to
/// them, broadcast, or sent by them.
pub fn is_visible_to(message: &ChatMessage, viewer: Role) -> bool {
    match message.receiver {
        Receiver::All => true,
        Receiver::Role(r) if r == viewer => true,
        _ => matches!(message.sender, Sender::Participant(s) if s == viewer),
    }
}

/// The transcript `viewer` sees, insertion order preserved.
pub fn transcript(messages: &[ChatMessage], viewer: Role) -> Vec<&ChatMessage> {
    messages
        .iter()
        .filter(|m| is_visible_to(m, viewer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MessageId, MessagePriority};

    const TEAM: [Role; 3] = [Role::Traffic, Role::Power, Role::Coordinator];

    fn message(sender: Sender, receiver: Receiver) -> ChatMessage {
        ChatMessage {
            id: MessageId(1),
            sender,
            receiver,
            content: "status?".into(),
            priority: MessagePriority::Normal,
            timestamp: 1,
        }
    }

    #[test]
    fn hierarchical_subsystem_role_reaches_coordinator_only() {
        let receivers = allowed_receivers(Role::Traffic, CommunicationMode::Hierarchical, &TEAM);
        assert_eq!(receivers, vec![Role::Coordinator]);
    }

    #[test]
    fn hierarchical_coordinator_reaches_whole_team() {
        let receivers =
            allowed_receivers(Role::Coordinator, CommunicationMode::Hierarchical, &TEAM);
        assert_eq!(receivers, TEAM.to_vec());
    }

    #[test]
    fn limited_mode_reaches_whole_team() {
        let receivers = allowed_receivers(Role::Power, CommunicationMode::Limited, &TEAM);
        assert_eq!(receivers, TEAM.to_vec());
    }

    #[test]
    fn broadcast_is_visible_to_everyone() {
        let m = message(Sender::Participant(Role::Power), Receiver::All);
        for role in Role::ALL {
            assert!(is_visible_to(&m, role));
        }
    }

    #[test]
    fn sender_sees_their_own_message() {
        // Receiver differs from the viewer, but the viewer sent it.
        let m = message(
            Sender::Participant(Role::Power),
            Receiver::Role(Role::Coordinator),
        );
        assert!(is_visible_to(&m, Role::Power));
    }

    #[test]
    fn third_parties_do_not_see_direct_messages() {
        let m = message(
            Sender::Participant(Role::Power),
            Receiver::Role(Role::Coordinator),
        );
        assert!(is_visible_to(&m, Role::Coordinator));
        assert!(!is_visible_to(&m, Role::Traffic));
        assert!(!is_visible_to(&m, Role::Medical));
    }

    #[test]
    fn system_broadcasts_reach_everyone() {
        let m = message(Sender::System, Receiver::All);
        for role in Role::ALL {
            assert!(is_visible_to(&m, role));
        }
    }

    #[test]
    fn transcript_preserves_insertion_order() {
        let log = vec![
            message(Sender::System, Receiver::All),
            message(
                Sender::Participant(Role::Power),
                Receiver::Role(Role::Coordinator),
            ),
            message(Sender::Participant(Role::Traffic), Receiver::All),
        ];
        let seen = transcript(&log, Role::Traffic);
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].sender, Sender::System);
        assert_eq!(seen[1].sender, Sender::Participant(Role::Traffic));
    }
}
