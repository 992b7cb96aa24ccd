//! Who is in a listening room, projected into rows for display.

use crate::api::RoomParticipant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub username: String,
    pub show_host_badge: bool,
}

/// The latest participant list the server sent for one room.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomMembership {
    participants: Vec<RoomParticipant>,
}

impl RoomMembership {
    #[cfg(test)]
    pub fn new(participants: Vec<RoomParticipant>) -> Self {
        Self { participants }
    }

    /// Each update is a full snapshot.
    pub fn replace(&mut self, participants: Vec<RoomParticipant>) {
        self.participants = participants;
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn host(&self) -> Option<&RoomParticipant> {
        self.participants.iter().find(|p| p.is_host)
    }

    /// One row per participant, in server order.
    pub fn rows(&self) -> Vec<ParticipantRow> {
        self.participants
            .iter()
            .map(|p| ParticipantRow {
                username: p.username.clone(),
                show_host_badge: p.is_host,
            })
            .collect()
    }
}
