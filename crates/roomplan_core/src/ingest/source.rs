//! External source contracts and JSON adapters.
//!
//! Sources decode whole documents before returning; a failed read returns an
//! error and yields nothing, so callers never observe partial data.

use crate::ingest::floor_plan::FloorPlanRegion;
use crate::ingest::roster::RosterRow;
use log::{error, info};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type SourceResult<T> = Result<T, SourceError>;

/// Source load failure; prior session state is left untouched.
#[derive(Debug)]
pub enum SourceError {
    Io { path: PathBuf, source: std::io::Error },
    Malformed { origin: String, message: String },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Malformed { origin, message } => {
                write!(f, "malformed document `{origin}`: {message}")
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { .. } => None,
        }
    }
}

/// Yields roster rows from an external tabular document.
pub trait RosterSource {
    fn read_rows(&self) -> SourceResult<Vec<RosterRow>>;
}

/// Yields shaped, identified regions from an external floor-plan document.
pub trait FloorPlanSource {
    fn read_regions(&self) -> SourceResult<Vec<FloorPlanRegion>>;
}

#[derive(Debug, Clone)]
enum JsonInput {
    File(PathBuf),
    Text(String),
}

impl JsonInput {
    fn decode<T: DeserializeOwned>(&self, kind: &str) -> SourceResult<Vec<T>> {
        let (origin, text) = match self {
            Self::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|err| {
                    error!(
                        "event=source_read module=ingest status=error kind={} error={}",
                        kind,
                        err.kind()
                    );
                    SourceError::Io {
                        path: path.clone(),
                        source: err,
                    }
                })?;
                (path.display().to_string(), text)
            }
            Self::Text(text) => ("<memory>".to_string(), text.clone()),
        };

        let records = serde_json::from_str::<Vec<T>>(&text).map_err(|err| {
            error!(
                "event=source_decode module=ingest status=error kind={} line={} column={}",
                kind,
                err.line(),
                err.column()
            );
            SourceError::Malformed {
                origin,
                message: err.to_string(),
            }
        })?;
        info!(
            "event=source_decode module=ingest status=ok kind={} records={}",
            kind,
            records.len()
        );
        Ok(records)
    }
}

/// Roster rows encoded as a JSON array of header-keyed objects.
#[derive(Debug, Clone)]
pub struct JsonRosterSource {
    input: JsonInput,
}

impl JsonRosterSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            input: JsonInput::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: JsonInput::Text(text.into()),
        }
    }
}

impl RosterSource for JsonRosterSource {
    fn read_rows(&self) -> SourceResult<Vec<RosterRow>> {
        self.input.decode("roster")
    }
}

/// Floor-plan regions encoded as a JSON array of `{id, shape, bounds}`.
#[derive(Debug, Clone)]
pub struct JsonFloorPlanSource {
    input: JsonInput,
}

impl JsonFloorPlanSource {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            input: JsonInput::File(path.as_ref().to_path_buf()),
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            input: JsonInput::Text(text.into()),
        }
    }
}

impl FloorPlanSource for JsonFloorPlanSource {
    fn read_regions(&self) -> SourceResult<Vec<FloorPlanRegion>> {
        self.input.decode("floor_plan")
    }
}
