//! Planner session facade.
//!
//! # Responsibility
//! - Own roster, floor-plan regions, and the assignment engine for one
//!   planning session; expose the use-case API the UI layer calls.
//! - Serialize advisory confirmation and source loads against mutations.
//!
//! # Invariants
//! - While an advisory confirmation is pending, every other mutation fails
//!   with `SessionError::TransitionPending`.
//! - Loads are two-phase (begin, commit); only the most recently begun load of
//!   each kind may commit (last begun wins). Superseded or failed loads leave
//!   state untouched.
//! - Committing a roster clears every assignment and every room's occupants;
//!   room configuration survives.

use crate::config::{PlannerPolicy, PolicyError};
use crate::engine::{
    AdvisoryReason, AssignError, AssignmentEngine, AssignmentIndex, HardRejection, Transition,
};
use crate::ingest::floor_plan::{extract_rooms, FloorPlanRegion, RoomRegion};
use crate::ingest::roster::{build_roster, RosterLoadReport, RosterRow};
use crate::ingest::source::{FloorPlanSource, RosterSource, SourceError, SourceResult};
use crate::model::person::{Person, PersonId};
use crate::model::room::{RoomConfig, RoomId, RoomSettings};
use crate::ordering::{unassigned, NameFilter};
use crate::registry::RoomRegistry;
use log::{info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Kind of external source a load ticket belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Roster,
    FloorPlan,
}

impl LoadKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Roster => "roster",
            Self::FloorPlan => "floor_plan",
        }
    }
}

/// Identity of one begun load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    id: Uuid,
    kind: LoadKind,
}

impl LoadTicket {
    pub fn kind(&self) -> LoadKind {
        self.kind
    }
}

/// Assignment parked until the user confirms or declines the advisory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAssignment {
    pub person_id: PersonId,
    pub target: RoomId,
    pub source: Option<RoomId>,
    pub reason: AdvisoryReason,
}

/// User answer to a pending advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryDecision {
    Confirm,
    Decline,
}

/// What the UI must redraw after a mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invalidation {
    pub rooms: Vec<RoomId>,
    pub unassigned_list: bool,
}

impl Invalidation {
    fn from_transition(transition: &Transition) -> Self {
        let mut rooms = Vec::with_capacity(2);
        if let Some(vacated) = transition.vacated.as_ref() {
            if vacated != &transition.target {
                rooms.push(vacated.clone());
            }
        }
        rooms.push(transition.target.clone());
        Self {
            rooms,
            unassigned_list: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() && !self.unassigned_list
    }
}

/// Room configuration plus resolved occupants for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub config: RoomConfig,
    /// Occupants in placement order; stale ids are skipped.
    pub occupants: Vec<Person>,
    /// Occupant ids with no matching person in the current roster.
    pub stale_count: usize,
}

/// Session-level failure surfaced to the UI as a message.
#[derive(Debug)]
pub enum SessionError {
    UnknownPerson(PersonId),
    Rejected(HardRejection),
    /// Advisory violated; the assignment is pending until resolved.
    ConfirmationRequired(AdvisoryReason),
    /// The user declined a pending advisory.
    UserAborted,
    /// Another transition awaits confirmation.
    TransitionPending,
    NoPendingConfirmation,
    /// A newer load of the same kind was begun after this ticket.
    Superseded(LoadKind),
    Source(SourceError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPerson(id) => write!(f, "person not found: {id}"),
            Self::Rejected(rejection) => write!(f, "{rejection}"),
            Self::ConfirmationRequired(reason) => write!(f, "{reason}"),
            Self::UserAborted => write!(f, "assignment cancelled"),
            Self::TransitionPending => {
                write!(f, "another assignment is awaiting confirmation")
            }
            Self::NoPendingConfirmation => write!(f, "no assignment is awaiting confirmation"),
            Self::Superseded(kind) => {
                write!(f, "{} load was superseded by a newer load", kind.as_str())
            }
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HardRejection> for SessionError {
    fn from(value: HardRejection) -> Self {
        Self::Rejected(value)
    }
}

impl From<SourceError> for SessionError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<AssignError> for SessionError {
    fn from(value: AssignError) -> Self {
        match value {
            AssignError::Rejected(rejection) => Self::Rejected(rejection),
            AssignError::ConfirmationRequired(reason) => Self::ConfirmationRequired(reason),
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, Default)]
struct LoadTracker {
    roster: Option<Uuid>,
    floor_plan: Option<Uuid>,
}

impl LoadTracker {
    fn slot(&mut self, kind: LoadKind) -> &mut Option<Uuid> {
        match kind {
            LoadKind::Roster => &mut self.roster,
            LoadKind::FloorPlan => &mut self.floor_plan,
        }
    }

    fn begin(&mut self, kind: LoadKind) -> LoadTicket {
        let id = Uuid::new_v4();
        *self.slot(kind) = Some(id);
        LoadTicket { id, kind }
    }

    /// Consumes the ticket when it is the newest for its kind.
    fn accept(&mut self, ticket: LoadTicket, expected: LoadKind) -> SessionResult<()> {
        if ticket.kind != expected {
            return Err(SessionError::Superseded(expected));
        }
        let slot = self.slot(expected);
        if *slot != Some(ticket.id) {
            return Err(SessionError::Superseded(expected));
        }
        *slot = None;
        Ok(())
    }
}

/// One planning session: roster, floor plan, and assignment state.
#[derive(Debug, Clone)]
pub struct PlannerSession {
    policy: PlannerPolicy,
    people: Vec<Person>,
    people_by_id: HashMap<PersonId, usize>,
    floor_plan: Vec<RoomRegion>,
    engine: AssignmentEngine,
    pending: Option<PendingAssignment>,
    loads: LoadTracker,
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::from_valid_policy(PlannerPolicy::default())
    }
}

impl PlannerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: PlannerPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self::from_valid_policy(policy))
    }

    fn from_valid_policy(policy: PlannerPolicy) -> Self {
        let engine = AssignmentEngine::new(policy.tenured_track_prefix.clone());
        Self {
            policy,
            people: Vec::new(),
            people_by_id: HashMap::new(),
            floor_plan: Vec::new(),
            engine,
            pending: None,
            loads: LoadTracker::default(),
        }
    }

    pub fn policy(&self) -> &PlannerPolicy {
        &self.policy
    }

    /// Current roster in source order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn person(&self, person_id: &PersonId) -> Option<&Person> {
        self.people_by_id
            .get(person_id)
            .and_then(|position| self.people.get(*position))
    }

    /// Droppable rooms from the current floor plan.
    pub fn floor_plan(&self) -> &[RoomRegion] {
        &self.floor_plan
    }

    pub fn rooms(&self) -> &RoomRegistry {
        self.engine.rooms()
    }

    pub fn assignments(&self) -> &AssignmentIndex {
        self.engine.index()
    }

    pub fn assignment_of(&self, person_id: &PersonId) -> Option<&RoomId> {
        self.engine.assignment_of(person_id)
    }

    pub fn pending(&self) -> Option<&PendingAssignment> {
        self.pending.as_ref()
    }

    /// Unassigned people whose name contains `search_term`, in priority order.
    pub fn list_unassigned(&self, search_term: &str) -> Vec<&Person> {
        unassigned(
            &self.people,
            self.engine.index(),
            &NameFilter::new(search_term),
        )
    }

    /// Read-only view of a room; unknown rooms report default configuration.
    pub fn room_snapshot(&self, room_id: &RoomId) -> RoomSnapshot {
        let (config, occupant_ids) = match self.engine.rooms().get(room_id) {
            Some(room) => (room.config, room.occupants()),
            None => (RoomConfig::default(), &[][..]),
        };
        let occupants: Vec<Person> = occupant_ids
            .iter()
            .filter_map(|person_id| self.person(person_id).cloned())
            .collect();
        RoomSnapshot {
            room_id: room_id.clone(),
            config,
            stale_count: occupant_ids.len() - occupants.len(),
            occupants,
        }
    }

    /// Opens a room for configuration, creating it with defaults if needed.
    pub fn inspect_room(&mut self, room_id: &RoomId) -> RoomSnapshot {
        self.engine.ensure_room(room_id);
        self.room_snapshot(room_id)
    }

    /// Requests a transition of `person_id` into `target`.
    ///
    /// An advisory violation parks the request; resolve it with
    /// `resolve_pending`.
    pub fn assign(
        &mut self,
        person_id: &PersonId,
        target: &RoomId,
        source: Option<&RoomId>,
    ) -> SessionResult<Invalidation> {
        self.ensure_idle()?;
        let person = self.lookup(person_id)?;
        match self.engine.try_assign(&person, target, source) {
            Ok(transition) => Ok(Invalidation::from_transition(&transition)),
            Err(AssignError::ConfirmationRequired(reason)) => {
                self.pending = Some(PendingAssignment {
                    person_id: person_id.clone(),
                    target: target.clone(),
                    source: source.cloned(),
                    reason,
                });
                Err(SessionError::ConfirmationRequired(reason))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Confirms or declines the pending advisory.
    ///
    /// Confirmation re-runs the hard checks before applying.
    pub fn resolve_pending(&mut self, decision: AdvisoryDecision) -> SessionResult<Invalidation> {
        let pending = self
            .pending
            .take()
            .ok_or(SessionError::NoPendingConfirmation)?;
        match decision {
            AdvisoryDecision::Decline => {
                info!(
                    "event=assign_declined module=session status=aborted room={}",
                    pending.target
                );
                Err(SessionError::UserAborted)
            }
            AdvisoryDecision::Confirm => {
                let person = self.lookup(&pending.person_id)?;
                let transition = self.engine.confirm_and_assign(
                    &person,
                    &pending.target,
                    pending.source.as_ref(),
                )?;
                Ok(Invalidation::from_transition(&transition))
            }
        }
    }

    /// Returns a person to the unassigned list; a no-op when unassigned.
    pub fn unassign(&mut self, person_id: &PersonId) -> SessionResult<Invalidation> {
        self.ensure_idle()?;
        Ok(match self.engine.unassign(person_id) {
            Some(room_id) => Invalidation {
                rooms: vec![room_id],
                unassigned_list: true,
            },
            None => Invalidation::default(),
        })
    }

    /// Applies the configuration panel to a room.
    pub fn configure_room(
        &mut self,
        room_id: &RoomId,
        settings: RoomSettings,
    ) -> SessionResult<Invalidation> {
        self.ensure_idle()?;
        self.engine.configure_room(room_id, settings);
        Ok(Invalidation {
            rooms: vec![room_id.clone()],
            unassigned_list: false,
        })
    }

    /// Empties one room, returning its occupants to the unassigned list.
    pub fn clear_room(&mut self, room_id: &RoomId) -> SessionResult<Invalidation> {
        self.ensure_idle()?;
        let removed = self.engine.clear_room(room_id);
        Ok(Invalidation {
            rooms: vec![room_id.clone()],
            unassigned_list: !removed.is_empty(),
        })
    }

    /// Drops every room configuration and assignment.
    pub fn reset_all(&mut self) -> SessionResult<Invalidation> {
        self.ensure_idle()?;
        let rooms = self.engine.rooms().room_ids();
        self.engine.reset_all();
        Ok(Invalidation {
            rooms,
            unassigned_list: true,
        })
    }

    pub fn begin_roster_load(&mut self) -> LoadTicket {
        self.loads.begin(LoadKind::Roster)
    }

    pub fn begin_floor_plan_load(&mut self) -> LoadTicket {
        self.loads.begin(LoadKind::FloorPlan)
    }

    /// Commits a completed roster read.
    ///
    /// Replaces the roster, clears every assignment and occupant list, and
    /// cancels any pending advisory.
    pub fn commit_roster(
        &mut self,
        ticket: LoadTicket,
        rows: SourceResult<Vec<RosterRow>>,
    ) -> SessionResult<RosterLoadReport> {
        if let Err(err) = self.loads.accept(ticket, LoadKind::Roster) {
            warn!("event=roster_commit module=session status=superseded");
            return Err(err);
        }
        let rows = rows?;
        let build = build_roster(&rows, &self.policy);

        let cleared = self.engine.clear_all_occupants();
        if self.pending.take().is_some() {
            info!("event=roster_commit module=session status=pending_cancelled");
        }
        self.people_by_id = build
            .people
            .iter()
            .enumerate()
            .map(|(position, person)| (person.id.clone(), position))
            .collect();
        self.people = build.people;

        info!(
            "event=roster_commit module=session status=ok people={} cleared_occupants={}",
            self.people.len(),
            cleared
        );
        Ok(build.report)
    }

    /// Commits a completed floor-plan read; room state is kept by id.
    pub fn commit_floor_plan(
        &mut self,
        ticket: LoadTicket,
        regions: SourceResult<Vec<FloorPlanRegion>>,
    ) -> SessionResult<usize> {
        if let Err(err) = self.loads.accept(ticket, LoadKind::FloorPlan) {
            warn!("event=floor_plan_commit module=session status=superseded");
            return Err(err);
        }
        let regions = regions?;
        self.floor_plan = extract_rooms(&regions, &self.policy);
        info!(
            "event=floor_plan_commit module=session status=ok rooms={}",
            self.floor_plan.len()
        );
        Ok(self.floor_plan.len())
    }

    /// Reads and commits a roster in one step.
    pub fn load_roster(&mut self, source: &dyn RosterSource) -> SessionResult<RosterLoadReport> {
        let ticket = self.begin_roster_load();
        self.commit_roster(ticket, source.read_rows())
    }

    /// Reads and commits a floor plan in one step.
    pub fn load_floor_plan(&mut self, source: &dyn FloorPlanSource) -> SessionResult<usize> {
        let ticket = self.begin_floor_plan_load();
        self.commit_floor_plan(ticket, source.read_regions())
    }

    fn ensure_idle(&self) -> SessionResult<()> {
        if self.pending.is_some() {
            return Err(SessionError::TransitionPending);
        }
        Ok(())
    }

    fn lookup(&self, person_id: &PersonId) -> SessionResult<Person> {
        self.person(person_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownPerson(person_id.clone()))
    }
}
