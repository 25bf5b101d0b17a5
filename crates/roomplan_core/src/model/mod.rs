//! Domain model for staff and rooms.
//!
//! # Responsibility
//! - Define strict record types shared by registry, engine, and ordering.
//! - Keep lenient parsing at the ingestion boundary only.
//!
//! # Invariants
//! - People are identified by `PersonId`, rooms by `RoomId`.
//! - Room capacity is never below one.

pub mod person;
pub mod room;
