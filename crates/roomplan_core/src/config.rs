//! Planner policy configuration.
//!
//! # Responsibility
//! - Hold the string markers used by ingestion filters and advisory checks.
//! - Load overrides from JSON while defaulting every missing field.
//!
//! # Invariants
//! - Every prefix is non-blank after validation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Track prefix identifying tenured staff.
pub const DEFAULT_TENURED_TRACK_PREFIX: &str = "전임";
/// Track prefix identifying clinical-visit staff excluded from rosters.
pub const DEFAULT_CLINICAL_VISIT_TRACK_PREFIX: &str = "임상방문";
/// Region id prefix (case-insensitive) marking non-droppable background shapes.
pub const DEFAULT_BACKGROUND_ID_PREFIX: &str = "bg";

/// Policy markers shared by ingestion and the assignment engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerPolicy {
    pub tenured_track_prefix: String,
    pub clinical_visit_track_prefix: String,
    pub background_id_prefix: String,
}

impl Default for PlannerPolicy {
    fn default() -> Self {
        Self {
            tenured_track_prefix: DEFAULT_TENURED_TRACK_PREFIX.to_string(),
            clinical_visit_track_prefix: DEFAULT_CLINICAL_VISIT_TRACK_PREFIX.to_string(),
            background_id_prefix: DEFAULT_BACKGROUND_ID_PREFIX.to_string(),
        }
    }
}

impl PlannerPolicy {
    /// Parses a JSON policy document; absent fields keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, PolicyError> {
        let policy: Self =
            serde_json::from_str(text).map_err(|err| PolicyError::Malformed(err.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        for (field, value) in [
            ("tenured_track_prefix", &self.tenured_track_prefix),
            (
                "clinical_visit_track_prefix",
                &self.clinical_visit_track_prefix,
            ),
            ("background_id_prefix", &self.background_id_prefix),
        ] {
            if value.trim().is_empty() {
                return Err(PolicyError::BlankPrefix(field));
            }
        }
        Ok(())
    }
}

/// Policy load/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    Malformed(String),
    BlankPrefix(&'static str),
}

impl Display for PolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "invalid policy document: {message}"),
            Self::BlankPrefix(field) => write!(f, "policy field `{field}` must not be blank"),
        }
    }
}

impl Error for PolicyError {}
