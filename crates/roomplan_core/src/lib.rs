//! Core domain logic for RoomPlan.
//! This crate owns the room-assignment rules and session state; hosts supply
//! decoded roster and floor-plan records and render what it reports.

pub mod config;
pub mod engine;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod registry;
pub mod session;

pub use config::{PlannerPolicy, PolicyError};
pub use engine::{
    AdvisoryCheck, AdvisoryReason, AssignError, AssignmentEngine, AssignmentIndex, HardRejection,
    Transition,
};
pub use ingest::floor_plan::{extract_rooms, Bounds, FloorPlanRegion, RoomRegion, ShapeKind};
pub use ingest::roster::{build_roster, RosterBuild, RosterLoadReport, RosterRow, RowIssue};
pub use ingest::source::{
    FloorPlanSource, JsonFloorPlanSource, JsonRosterSource, RosterSource, SourceError,
    SourceResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::person::{Gender, Person, PersonId, Seniority, Title};
pub use model::room::{Room, RoomConfig, RoomId, RoomSettings, RoomType};
pub use ordering::{compare_people, sort_people, NameFilter};
pub use registry::RoomRegistry;
pub use session::{
    AdvisoryDecision, Invalidation, LoadKind, LoadTicket, PendingAssignment, PlannerSession,
    RoomSnapshot, SessionError, SessionResult,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
