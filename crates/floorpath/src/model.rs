use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a floor in the widget's floor list.
pub type FloorIndex = usize;

/// Absolute tolerance used when matching route coordinates.
pub const POINT_EPSILON: f64 = 1e-6;

/// A point in floor-diagram user space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate equality within [`POINT_EPSILON`].
    pub fn approx_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() <= POINT_EPSILON && (self.y - other.y).abs() <= POINT_EPSILON
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point at fraction `t` of the way from `self` to `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which end of a segment, or which side of a portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Which {
    A,
    B,
}

impl Which {
    pub fn other(self) -> Which {
        match self {
            Which::A => Which::B,
            Which::B => Which::A,
        }
    }
}

// ─── Route index data ────────────────────────────────────────────────────────

/// An intra-floor walkable edge between two named endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub ax: f64,
    pub ay: f64,
    pub bx: f64,
    pub by: f64,
    pub length: f64,
    /// Door ids touching endpoint A.
    #[serde(rename = "doorA", default)]
    pub door_a: Vec<String>,
    /// Door ids touching endpoint B.
    #[serde(rename = "doorB", default)]
    pub door_b: Vec<String>,
}

impl PathSegment {
    pub fn end(&self, which: Which) -> Point {
        match which {
            Which::A => Point::new(self.ax, self.ay),
            Which::B => Point::new(self.bx, self.by),
        }
    }

    pub fn doors(&self, which: Which) -> &[String] {
        match which {
            Which::A => &self.door_a,
            Which::B => &self.door_b,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortalKind {
    #[default]
    Stair,
    Elevator,
    #[serde(other)]
    Other,
}

/// A stair/elevator connection between two (possibly equal) floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: PortalKind,
    #[serde(rename = "floorANum")]
    pub floor_a: FloorIndex,
    #[serde(rename = "floorBNum")]
    pub floor_b: FloorIndex,
    #[serde(rename = "xA")]
    pub x_a: f64,
    #[serde(rename = "yA")]
    pub y_a: f64,
    #[serde(rename = "xB")]
    pub x_b: f64,
    #[serde(rename = "yB")]
    pub y_b: f64,
}

impl Portal {
    pub fn side(&self, which: Which) -> Point {
        match which {
            Which::A => Point::new(self.x_a, self.y_a),
            Which::B => Point::new(self.x_b, self.y_b),
        }
    }

    pub fn floor(&self, which: Which) -> FloorIndex {
        match which {
            Which::A => self.floor_a,
            Which::B => self.floor_b,
        }
    }

    pub fn is_same_floor(&self) -> bool {
        self.floor_a == self.floor_b
    }
}

/// Segment and portal records the route index computes solutions over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    /// Walkable segments, grouped per floor.
    pub paths: Vec<Vec<PathSegment>>,
    pub portals: Vec<Portal>,
}

impl RouteGeometry {
    pub fn segment(&self, floor: FloorIndex, segment: usize) -> crate::Result<&PathSegment> {
        self.paths
            .get(floor)
            .and_then(|segments| segments.get(segment))
            .ok_or(crate::Error::UnknownSegment { floor, segment })
    }

    pub fn portal(&self, portal: usize) -> crate::Result<&Portal> {
        self.portals
            .get(portal)
            .ok_or(crate::Error::UnknownPortal { portal })
    }
}

// ─── Solutions ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Segment,
    Transition,
}

/// One edge of a solution.
///
/// For a segment step `edge` indexes `paths[floor]`. For a transition step it
/// indexes the portal list and `floor` is the floor being entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub kind: StepKind,
    pub floor: FloorIndex,
    pub edge: usize,
}

impl SolutionStep {
    pub fn segment(floor: FloorIndex, edge: usize) -> Self {
        Self {
            kind: StepKind::Segment,
            floor,
            edge,
        }
    }

    pub fn transition(floor: FloorIndex, edge: usize) -> Self {
        Self {
            kind: StepKind::Transition,
            floor,
            edge,
        }
    }
}

/// Ordered edge sequence returned by the route index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub solution: Vec<SolutionStep>,
}

impl Solution {
    pub fn transition_count(&self) -> usize {
        self.solution
            .iter()
            .filter(|s| s.kind == StepKind::Transition)
            .count()
    }

    /// Walking length of all segment steps.
    pub fn length(&self, geometry: &RouteGeometry) -> crate::Result<f64> {
        let mut total = 0.0;
        for step in &self.solution {
            if step.kind == StepKind::Segment {
                total += geometry.segment(step.floor, step.edge)?.length;
            }
        }
        Ok(total)
    }
}

// ─── Drawing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOpKind {
    Move,
    Line,
    Curve,
}

/// One drawing instruction. `to` is where the op ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOp {
    pub kind: DrawOpKind,
    pub to: Point,
    /// Quadratic control point, curves only.
    pub control: Option<Point>,
    pub length: f64,
    pub floor: FloorIndex,
}

impl DrawOp {
    pub fn move_to(to: Point, floor: FloorIndex) -> Self {
        Self {
            kind: DrawOpKind::Move,
            to,
            control: None,
            length: 0.0,
            floor,
        }
    }

    pub fn line_to(to: Point, length: f64, floor: FloorIndex) -> Self {
        Self {
            kind: DrawOpKind::Line,
            to,
            control: None,
            length,
            floor,
        }
    }

    pub fn curve_to(control: Point, to: Point, floor: FloorIndex) -> Self {
        Self {
            kind: DrawOpKind::Curve,
            to,
            control: Some(control),
            length: 0.0,
            floor,
        }
    }

    pub fn is_line(&self) -> bool {
        self.kind == DrawOpKind::Line
    }
}

/// The polyline for one contiguous floor portion of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingGroup {
    pub floor: FloorIndex,
    pub ops: Vec<DrawOp>,
    /// Sum of line lengths at assembly time.
    pub route_length: f64,
}

impl DrawingGroup {
    /// Open a group with a move to `origin`.
    pub fn starting_at(origin: Point, floor: FloorIndex) -> Self {
        Self {
            floor,
            ops: vec![DrawOp::move_to(origin, floor)],
            route_length: 0.0,
        }
    }

    pub fn push_line(&mut self, to: Point, length: f64) {
        self.ops.push(DrawOp::line_to(to, length, self.floor));
        self.route_length += length;
    }

    pub fn last_point(&self) -> Option<Point> {
        self.ops.last().map(|op| op.to)
    }

    pub fn line_count(&self) -> usize {
        self.ops.iter().filter(|op| op.is_line()).count()
    }
}

/// All drawing groups for one route request.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub start: String,
    pub destination: String,
    pub groups: Vec<DrawingGroup>,
}

impl Drawing {
    pub fn total_length(&self) -> f64 {
        self.groups.iter().map(|g| g.route_length).sum()
    }

    /// Index of the last group drawn on `floor`.
    pub fn group_on_floor(&self, floor: FloorIndex) -> Option<usize> {
        self.groups.iter().rposition(|g| g.floor == floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_tolerates_rounding() {
        let a = Point::new(0.1 + 0.2, 5.0);
        assert!(a.approx_eq(Point::new(0.3, 5.0)));
        assert!(!a.approx_eq(Point::new(0.31, 5.0)));
    }

    #[test]
    fn lerp_midpoint() {
        let p = Point::new(0.0, 0.0).lerp(Point::new(10.0, 20.0), 0.5);
        assert_eq!(p, Point::new(5.0, 10.0));
    }

    #[test]
    fn solution_step_json_shape() {
        let step: SolutionStep =
            serde_json::from_str(r#"{"kind":"transition","floor":1,"edge":4}"#).unwrap();
        assert_eq!(step, SolutionStep::transition(1, 4));
    }

    #[test]
    fn portal_json_uses_data_store_names() {
        let portal: Portal = serde_json::from_str(
            r#"{"type":"elevator","floorANum":0,"floorBNum":2,"xA":1,"yA":2,"xB":3,"yB":4}"#,
        )
        .unwrap();
        assert_eq!(portal.kind, PortalKind::Elevator);
        assert_eq!(portal.side(Which::B), Point::new(3.0, 4.0));
        assert_eq!(portal.floor(Which::B), 2);
    }

    #[test]
    fn group_on_floor_picks_last_match() {
        let drawing = Drawing {
            start: "a".into(),
            destination: "b".into(),
            groups: vec![
                DrawingGroup::starting_at(Point::default(), 0),
                DrawingGroup::starting_at(Point::default(), 1),
                DrawingGroup::starting_at(Point::default(), 0),
            ],
        };
        assert_eq!(drawing.group_on_floor(0), Some(2));
        assert_eq!(drawing.group_on_floor(1), Some(1));
        assert_eq!(drawing.group_on_floor(5), None);
    }

    #[test]
    fn unknown_segment_is_an_error() {
        let geometry = RouteGeometry::default();
        assert!(matches!(
            geometry.segment(0, 3),
            Err(crate::Error::UnknownSegment {
                floor: 0,
                segment: 3
            })
        ));
    }
}
