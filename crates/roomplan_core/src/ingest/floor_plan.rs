//! Floor-plan region extraction.
//!
//! # Responsibility
//! - Turn decoded floor-plan shapes into droppable room regions.
//!
//! # Invariants
//! - Only supported shape kinds become rooms.
//! - Ids prefixed (case-insensitively) with the background marker are never
//!   rooms.
//! - Room ids are unique; the first region with an id wins.

use crate::config::PlannerPolicy;
use crate::model::room::RoomId;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Shape element kind of a floor-plan region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Path,
    Polygon,
    Polyline,
    Circle,
    Ellipse,
    /// Any other element (`g`, `text`, `line`, ...).
    #[serde(other)]
    Unsupported,
}

impl ShapeKind {
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Approximate on-screen box used for overlay placement.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One decoded shape element with an id attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlanRegion {
    pub id: String,
    pub shape: ShapeKind,
    #[serde(default)]
    pub bounds: Bounds,
}

/// A region accepted as a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRegion {
    pub room_id: RoomId,
    pub shape: ShapeKind,
    pub bounds: Bounds,
}

/// Filters decoded regions down to droppable rooms, keeping input order.
pub fn extract_rooms(regions: &[FloorPlanRegion], policy: &PlannerPolicy) -> Vec<RoomRegion> {
    let background = policy.background_id_prefix.to_lowercase();
    let mut seen = HashSet::new();
    let mut rooms = Vec::new();

    for region in regions {
        let id = region.id.trim();
        if id.is_empty() || !region.shape.is_supported() {
            continue;
        }
        if id.to_lowercase().starts_with(background.as_str()) {
            continue;
        }
        if !seen.insert(id.to_string()) {
            continue;
        }
        rooms.push(RoomRegion {
            room_id: RoomId::new(id),
            shape: region.shape,
            bounds: region.bounds,
        });
    }

    info!(
        "event=floor_plan_extract module=ingest status=ok regions={} rooms={}",
        regions.len(),
        rooms.len()
    );
    rooms
}

#[cfg(test)]
mod tests {
    use super::{extract_rooms, Bounds, FloorPlanRegion, ShapeKind};
    use crate::config::PlannerPolicy;

    fn region(id: &str, shape: ShapeKind) -> FloorPlanRegion {
        FloorPlanRegion {
            id: id.to_string(),
            shape,
            bounds: Bounds::default(),
        }
    }

    #[test]
    fn keeps_supported_non_background_shapes() {
        let regions = vec![
            region("R101", ShapeKind::Rect),
            region("BG_floor", ShapeKind::Rect),
            region("bgWall", ShapeKind::Path),
            region("label", ShapeKind::Unsupported),
            region("R102", ShapeKind::Polygon),
            region("R101", ShapeKind::Circle),
            region("", ShapeKind::Ellipse),
        ];
        let rooms = extract_rooms(&regions, &PlannerPolicy::default());
        let ids: Vec<&str> = rooms.iter().map(|room| room.room_id.as_str()).collect();
        assert_eq!(ids, vec!["R101", "R102"]);
        assert_eq!(rooms[0].shape, ShapeKind::Rect);
    }

    #[test]
    fn unknown_shape_tags_decode_as_unsupported() {
        let region: FloorPlanRegion =
            serde_json::from_str(r#"{"id":"t1","shape":"text"}"#).expect("region should decode");
        assert_eq!(region.shape, ShapeKind::Unsupported);
        assert_eq!(region.bounds, Bounds::default());
    }
}
