//! Assignment engine.
//!
//! # Responsibility
//! - Validate and apply occupancy transitions (assign, move, unassign, clear).
//! - Own the assignment index and route every occupant-list write.
//!
//! # Invariants
//! - A person is in the index iff they are in exactly one room's occupant
//!   list, and the index entry names that room.
//! - An assignment is accepted only while the target is below capacity.
//! - Validation order is gender, capacity, then room-type advisory; the first
//!   failure wins and leaves state untouched.
//! - A room-to-room move is a single `&mut self` call: no caller can observe
//!   the person in two rooms or in none.

use crate::model::person::{Gender, Person, PersonId};
use crate::model::room::{Room, RoomId, RoomSettings, RoomType};
use crate::registry::RoomRegistry;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Person → room mapping, written only by `AssignmentEngine`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentIndex {
    entries: BTreeMap<PersonId, RoomId>,
}

impl AssignmentIndex {
    pub fn get(&self, person_id: &PersonId) -> Option<&RoomId> {
        self.entries.get(person_id)
    }

    pub fn contains(&self, person_id: &PersonId) -> bool {
        self.entries.contains_key(person_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PersonId, &RoomId)> {
        self.entries.iter()
    }
}

/// Transition refused outright; no confirmation can override it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardRejection {
    GenderMismatch {
        room_id: RoomId,
        required: Gender,
    },
    CapacityExceeded {
        room_id: RoomId,
        capacity: u32,
    },
}

impl Display for HardRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GenderMismatch { room_id, required } => {
                write!(f, "room {room_id} is restricted to {required}")
            }
            Self::CapacityExceeded { room_id, capacity } => {
                write!(f, "room {room_id} is full (capacity: {capacity})")
            }
        }
    }
}

impl Error for HardRejection {}

/// Room-type recommendation the person does not meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryReason {
    /// Single rooms are recommended for tenured top-rank staff.
    SingleRoomRecommendation,
    /// Double rooms are recommended for tenured staff below top rank.
    DoubleRoomRecommendation,
}

impl Display for AdvisoryReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleRoomRecommendation => write!(
                f,
                "single rooms are recommended for tenured professors; continue anyway?"
            ),
            Self::DoubleRoomRecommendation => write!(
                f,
                "double rooms are recommended for tenured staff other than professors; continue anyway?"
            ),
        }
    }
}

/// Outcome of the first phase of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryCheck {
    Clear,
    NeedsConfirmation(AdvisoryReason),
}

/// Assignment failure surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    Rejected(HardRejection),
    /// Advisory violated; call `confirm_and_assign` after obtaining consent.
    ConfirmationRequired(AdvisoryReason),
}

impl Display for AssignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(rejection) => write!(f, "{rejection}"),
            Self::ConfirmationRequired(reason) => write!(f, "{reason}"),
        }
    }
}

impl Error for AssignError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            Self::ConfirmationRequired(_) => None,
        }
    }
}

impl From<HardRejection> for AssignError {
    fn from(value: HardRejection) -> Self {
        Self::Rejected(value)
    }
}

/// Rooms touched by an accepted assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub person_id: PersonId,
    /// Previous room, when the person was moved rather than newly placed.
    pub vacated: Option<RoomId>,
    pub target: RoomId,
}

/// Assignment state machine over a room registry and the assignment index.
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    rooms: RoomRegistry,
    index: AssignmentIndex,
    tenured_track_prefix: String,
}

impl AssignmentEngine {
    pub fn new(tenured_track_prefix: impl Into<String>) -> Self {
        Self {
            rooms: RoomRegistry::new(),
            index: AssignmentIndex::default(),
            tenured_track_prefix: tenured_track_prefix.into(),
        }
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    pub fn index(&self) -> &AssignmentIndex {
        &self.index
    }

    pub fn assignment_of(&self, person_id: &PersonId) -> Option<&RoomId> {
        self.index.get(person_id)
    }

    /// Returns the room, creating it with defaults on first reference.
    pub fn ensure_room(&mut self, room_id: &RoomId) -> &Room {
        self.rooms.ensure_room(room_id)
    }

    /// Applies configuration; occupants are never evicted.
    pub fn configure_room(&mut self, room_id: &RoomId, settings: RoomSettings) -> &Room {
        self.rooms.configure(room_id, settings)
    }

    /// First phase: hard checks, then the room-type advisory.
    ///
    /// Creates the target room with defaults when first referenced.
    pub fn check(
        &mut self,
        person: &Person,
        target: &RoomId,
    ) -> Result<AdvisoryCheck, HardRejection> {
        let room = self.rooms.ensure_room(target);
        check_hard_rules(room, person, target)?;
        Ok(check_advisory(
            room.config.room_type,
            person,
            &self.tenured_track_prefix,
        ))
    }

    /// Validates and, when no confirmation is needed, applies the transition.
    ///
    /// `source` is the drag-origin hint; the index stays authoritative.
    pub fn try_assign(
        &mut self,
        person: &Person,
        target: &RoomId,
        source: Option<&RoomId>,
    ) -> Result<Transition, AssignError> {
        match self.check(person, target) {
            Ok(AdvisoryCheck::Clear) => Ok(self.apply(person, target, source)),
            Ok(AdvisoryCheck::NeedsConfirmation(reason)) => {
                info!(
                    "event=assign module=engine status=needs_confirmation room={} reason={:?}",
                    target, reason
                );
                Err(AssignError::ConfirmationRequired(reason))
            }
            Err(rejection) => {
                info!(
                    "event=assign module=engine status=rejected room={} reason={:?}",
                    target, rejection
                );
                Err(AssignError::Rejected(rejection))
            }
        }
    }

    /// Second phase: re-runs hard checks and applies, skipping the advisory.
    pub fn confirm_and_assign(
        &mut self,
        person: &Person,
        target: &RoomId,
        source: Option<&RoomId>,
    ) -> Result<Transition, HardRejection> {
        let room = self.rooms.ensure_room(target);
        if let Err(rejection) = check_hard_rules(room, person, target) {
            info!(
                "event=assign_confirmed module=engine status=rejected room={} reason={:?}",
                target, rejection
            );
            return Err(rejection);
        }
        Ok(self.apply(person, target, source))
    }

    /// Removes the person's current assignment, if any.
    ///
    /// Returns the vacated room; a second call is a no-op returning `None`.
    pub fn unassign(&mut self, person_id: &PersonId) -> Option<RoomId> {
        let room_id = self.index.entries.remove(person_id)?;
        self.rooms.remove_occupant(&room_id, person_id);
        debug!(
            "event=unassign module=engine status=ok room={} remaining={}",
            room_id,
            self.rooms.get(&room_id).map_or(0, Room::occupant_count)
        );
        Some(room_id)
    }

    /// Empties one room and drops each occupant's index entry.
    pub fn clear_room(&mut self, room_id: &RoomId) -> Vec<PersonId> {
        let removed = self.rooms.clear_room(room_id);
        for person_id in &removed {
            self.index.entries.remove(person_id);
        }
        info!(
            "event=room_clear module=engine status=ok room={} removed={}",
            room_id,
            removed.len()
        );
        removed
    }

    /// Empties every room, keeping configuration, and clears the index.
    pub fn clear_all_occupants(&mut self) -> usize {
        let removed = self.rooms.clear_all_occupants();
        self.index.entries.clear();
        removed
    }

    /// Drops every room and every assignment.
    pub fn reset_all(&mut self) {
        self.rooms.reset_all();
        self.index.entries.clear();
        info!("event=reset module=engine status=ok");
    }

    fn apply(&mut self, person: &Person, target: &RoomId, source: Option<&RoomId>) -> Transition {
        let person_id = person.id.clone();
        let vacated = self.index.entries.remove(&person_id);

        if let Some(hint) = source {
            if vacated.as_ref() != Some(hint) {
                warn!(
                    "event=assign module=engine status=stale_source source={} indexed={}",
                    hint,
                    vacated.as_ref().map_or("none", RoomId::as_str)
                );
            }
        }

        if let Some(previous) = vacated.as_ref() {
            self.rooms.remove_occupant(previous, &person_id);
        }
        self.rooms.push_occupant(target, person_id.clone());
        self.index.entries.insert(person_id.clone(), target.clone());

        info!(
            "event=assign module=engine status=ok room={} moved_from={} occupants={}",
            target,
            vacated.as_ref().map_or("none", RoomId::as_str),
            self.rooms.get(target).map_or(0, Room::occupant_count)
        );

        Transition {
            person_id,
            vacated,
            target: target.clone(),
        }
    }
}

fn check_hard_rules(room: &Room, person: &Person, target: &RoomId) -> Result<(), HardRejection> {
    if let Some(required) = room.config.gender {
        if required != person.gender {
            return Err(HardRejection::GenderMismatch {
                room_id: target.clone(),
                required,
            });
        }
    }
    if room.is_full() {
        return Err(HardRejection::CapacityExceeded {
            room_id: target.clone(),
            capacity: room.config.capacity,
        });
    }
    Ok(())
}

fn check_advisory(
    room_type: Option<RoomType>,
    person: &Person,
    tenured_prefix: &str,
) -> AdvisoryCheck {
    let tenured = person.is_tenured(tenured_prefix);
    let top_rank = person.title.is_top_rank();
    match room_type {
        Some(RoomType::Single) if !(tenured && top_rank) => {
            AdvisoryCheck::NeedsConfirmation(AdvisoryReason::SingleRoomRecommendation)
        }
        Some(RoomType::Double) if !(tenured && !top_rank) => {
            AdvisoryCheck::NeedsConfirmation(AdvisoryReason::DoubleRoomRecommendation)
        }
        _ => AdvisoryCheck::Clear,
    }
}
