use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Point;

/// A door drawn as a two-point line on a floor diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Door {
    pub fn midpoint(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// An SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow the box by `pad` on every side.
    pub fn padded(self, pad: f64) -> Self {
        Self {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

/// One floor diagram as handed over by the diagram loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: String,
    /// Source location of the diagram, informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_box: Option<ViewBox>,
    #[serde(default)]
    pub doors: BTreeMap<String, Door>,
    #[serde(default)]
    pub rooms: Vec<String>,
    /// Raw SVG body emitted under the diagram root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
}

impl Floor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn door(&self, id: &str) -> Option<&Door> {
        self.doors.get(id)
    }

    pub fn has_room(&self, id: &str) -> bool {
        self.rooms.iter().any(|r| r == id)
    }
}

/// Make floor ids unique. Any duplicate renames every floor to `map_{n}`.
///
/// Returns true when ids were reassigned.
pub fn ensure_unique_ids(floors: &mut [Floor]) -> bool {
    let duplicated = floors
        .iter()
        .enumerate()
        .any(|(i, f)| floors[i + 1..].iter().any(|g| g.id == f.id));
    if duplicated {
        for (i, floor) in floors.iter_mut().enumerate() {
            floor.id = format!("map_{i}");
        }
    }
    duplicated
}

/// Locate a door across all floors.
pub fn find_door<'a>(floors: &'a [Floor], id: &str) -> Option<(usize, &'a Door)> {
    floors
        .iter()
        .enumerate()
        .find_map(|(i, f)| f.door(id).map(|d| (i, d)))
}
