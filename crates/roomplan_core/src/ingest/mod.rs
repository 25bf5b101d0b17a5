//! Ingestion boundary for roster and floor-plan sources.
//!
//! # Responsibility
//! - Define the source contracts the core consumes.
//! - Convert decoded external records into strict domain types.
//!
//! # Invariants
//! - Loads are all-or-nothing: a decode failure yields an error, never a
//!   partial record list.
//!
//! Spreadsheet and vector-graphics parsing live with the host; the core
//! accepts their decoded records.

pub mod floor_plan;
pub mod roster;
pub mod source;
