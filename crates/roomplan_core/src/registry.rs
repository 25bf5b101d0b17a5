//! Room registry.
//!
//! # Responsibility
//! - Own per-room configuration and occupant lists.
//! - Create rooms lazily with default configuration.
//!
//! # Invariants
//! - Occupant lists are only mutated through crate-private methods invoked by
//!   the assignment engine, which keeps the assignment index in sync.
//! - Configuration changes never evict occupants; an over-capacity room
//!   simply rejects further additions.

use crate::model::person::PersonId;
use crate::model::room::{clamp_capacity, Room, RoomId, RoomSettings};
use log::debug;
use std::collections::BTreeMap;

/// Room configuration and occupancy keyed by room id.
#[derive(Debug, Clone, Default)]
pub struct RoomRegistry {
    rooms: BTreeMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the room, creating it with defaults on first reference.
    pub fn ensure_room(&mut self, room_id: &RoomId) -> &Room {
        self.ensure_room_mut(room_id)
    }

    /// Overwrites type, capacity, and gender restriction.
    ///
    /// Capacity is clamped to at least one.
    pub fn configure(&mut self, room_id: &RoomId, settings: RoomSettings) -> &Room {
        let room = self.ensure_room_mut(room_id);
        room.config.room_type = settings.room_type;
        room.config.capacity = clamp_capacity(settings.capacity);
        room.config.gender = settings.gender;
        if room.occupants.len() > room.config.capacity as usize {
            debug!(
                "event=room_configure module=registry status=over_capacity room={} occupants={} capacity={}",
                room_id,
                room.occupants.len(),
                room.config.capacity
            );
        }
        room
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Returns known room ids in sorted order.
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomId, &Room)> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Empties one room and returns the removed occupants in order.
    pub(crate) fn clear_room(&mut self, room_id: &RoomId) -> Vec<PersonId> {
        std::mem::take(&mut self.ensure_room_mut(room_id).occupants)
    }

    /// Empties every room, keeping configuration.
    pub(crate) fn clear_all_occupants(&mut self) -> usize {
        self.rooms
            .values_mut()
            .map(|room| {
                let removed = room.occupants.len();
                room.occupants.clear();
                removed
            })
            .sum()
    }

    /// Drops every room and its state.
    pub(crate) fn reset_all(&mut self) {
        self.rooms.clear();
    }

    pub(crate) fn push_occupant(&mut self, room_id: &RoomId, person_id: PersonId) {
        self.ensure_room_mut(room_id).occupants.push(person_id);
    }

    /// Removes a person from one room; returns whether they were present.
    pub(crate) fn remove_occupant(&mut self, room_id: &RoomId, person_id: &PersonId) -> bool {
        match self.rooms.get_mut(room_id) {
            Some(room) => {
                let before = room.occupants.len();
                room.occupants.retain(|occupant| occupant != person_id);
                room.occupants.len() != before
            }
            None => false,
        }
    }

    fn ensure_room_mut(&mut self, room_id: &RoomId) -> &mut Room {
        self.rooms.entry(room_id.clone()).or_default()
    }
}
