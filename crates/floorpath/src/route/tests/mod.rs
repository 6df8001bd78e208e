mod end_to_end;

use super::{RouteEnds, synthesize};
use crate::model::{
    Drawing, FloorIndex, PathSegment, Point, Portal, PortalKind, RouteGeometry, Solution,
    SolutionStep,
};

/// Helper to create a PathSegment between two doors.
fn seg(a: (f64, f64), door_a: &str, b: (f64, f64), door_b: &str, length: f64) -> PathSegment {
    PathSegment {
        ax: a.0,
        ay: a.1,
        bx: b.0,
        by: b.1,
        length,
        door_a: doors(door_a),
        door_b: doors(door_b),
    }
}

fn doors(id: &str) -> Vec<String> {
    if id.is_empty() {
        Vec::new()
    } else {
        vec![id.to_string()]
    }
}

/// Helper to create a stair portal.
fn stair(floor_a: FloorIndex, a: (f64, f64), floor_b: FloorIndex, b: (f64, f64)) -> Portal {
    Portal {
        id: None,
        kind: PortalKind::Stair,
        floor_a,
        floor_b,
        x_a: a.0,
        y_a: a.1,
        x_b: b.0,
        y_b: b.1,
    }
}

fn solution(steps: &[SolutionStep]) -> Solution {
    Solution {
        solution: steps.to_vec(),
    }
}

fn pa(floor: FloorIndex, edge: usize) -> SolutionStep {
    SolutionStep::segment(floor, edge)
}

fn po(floor: FloorIndex, edge: usize) -> SolutionStep {
    SolutionStep::transition(floor, edge)
}

/// Two floors joined by stair S: D1 -(12)- X on floor 0, Y -(8)- D2 on floor 1.
fn two_floor_building() -> RouteGeometry {
    RouteGeometry {
        paths: vec![
            vec![seg((0.0, 0.0), "D1", (0.0, 12.0), "", 12.0)],
            vec![seg((50.0, 50.0), "", (58.0, 50.0), "D2", 8.0)],
        ],
        portals: vec![stair(0, (0.0, 12.0), 1, (50.0, 50.0))],
    }
}

/// Synthesize with smoothing off.
fn draw(geometry: &RouteGeometry, steps: &[SolutionStep], start: &str) -> Drawing {
    synthesize(
        geometry,
        &solution(steps),
        RouteEnds {
            start,
            destination: "dest",
            start_point: None,
        },
        0.0,
    )
    .unwrap_or_else(|e| panic!("route from {start} failed: {e}"))
}

/// End points of every op in a group.
fn points(drawing: &Drawing, group: usize) -> Vec<Point> {
    drawing.groups[group].ops.iter().map(|op| op.to).collect()
}
