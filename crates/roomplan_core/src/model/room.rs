//! Room domain model.
//!
//! # Responsibility
//! - Define room identity, configuration, and occupancy shapes.
//! - Parse configuration-panel input into typed settings.
//!
//! # Invariants
//! - `capacity` is always >= 1.
//! - Occupant order is insertion order.

use crate::model::person::{parse_leading_int, Gender, PersonId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Capacity used for new rooms and for invalid panel input.
pub const DEFAULT_CAPACITY: u32 = 1;

/// Stable room identifier taken from the floor-plan region id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RoomId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Room size category driving advisory checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "1인실")]
    Single,
    #[serde(rename = "2인실")]
    Double,
    #[serde(rename = "다인실")]
    Multi,
}

impl RoomType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "1인실" | "single" => Some(Self::Single),
            "2인실" | "double" => Some(Self::Double),
            "다인실" | "multi" => Some(Self::Multi),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "1인실",
            Self::Double => "2인실",
            Self::Multi => "다인실",
        }
    }
}

impl Display for RoomType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-room configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub capacity: u32,
    /// `None` means no gender restriction.
    pub gender: Option<Gender>,
    /// `None` means the type is unset.
    pub room_type: Option<RoomType>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            gender: None,
            room_type: None,
        }
    }
}

/// Typed settings applied to a room by the configuration action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoomSettings {
    pub room_type: Option<RoomType>,
    pub capacity: u32,
    pub gender: Option<Gender>,
}

impl RoomSettings {
    pub fn new(room_type: Option<RoomType>, capacity: u32, gender: Option<Gender>) -> Self {
        Self {
            room_type,
            capacity,
            gender,
        }
    }

    /// Builds settings from raw panel fields.
    ///
    /// Blank or unrecognized type/gender mean "unset"/"none"; capacity that
    /// is blank, unparsable, or below one becomes `DEFAULT_CAPACITY`.
    pub fn from_panel(room_type: &str, capacity: &str, gender: &str) -> Self {
        Self {
            room_type: RoomType::parse(room_type),
            capacity: parse_capacity(capacity),
            gender: Gender::parse(gender),
        }
    }
}

fn parse_capacity(value: &str) -> u32 {
    parse_leading_int(value)
        .and_then(|parsed| u32::try_from(parsed).ok())
        .map(clamp_capacity)
        .unwrap_or(DEFAULT_CAPACITY)
}

pub(crate) fn clamp_capacity(capacity: u32) -> u32 {
    capacity.max(DEFAULT_CAPACITY)
}

/// Room configuration plus ordered occupants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Room {
    pub config: RoomConfig,
    pub(crate) occupants: Vec<PersonId>,
}

impl Room {
    pub fn occupants(&self) -> &[PersonId] {
        &self.occupants
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_full(&self) -> bool {
        self.occupants.len() >= self.config.capacity as usize
    }

    pub fn contains(&self, person_id: &PersonId) -> bool {
        self.occupants.contains(person_id)
    }
}
