use crate::model::{FloorIndex, PathSegment, Point, Portal, RouteGeometry, SolutionStep, Which};
use crate::{Error, Result};

/// The end of `segment` a line from `previous` travels to.
///
/// Arriving at endpoint A means leaving through B and the reverse. `None` when
/// the segment touches neither end.
pub fn segment_exit(segment: &PathSegment, previous: Point) -> Option<Which> {
    if previous.approx_eq(segment.end(Which::A)) {
        Some(Which::B)
    } else if previous.approx_eq(segment.end(Which::B)) {
        Some(Which::A)
    } else {
        None
    }
}

/// The end of the first segment the route starts from.
///
/// Door membership decides first; the start door's midpoint is the fallback.
pub fn segment_origin(
    segment: &PathSegment,
    start: &str,
    start_point: Option<Point>,
) -> Option<Which> {
    for which in [Which::A, Which::B] {
        if segment.doors(which).iter().any(|d| d == start) {
            return Some(which);
        }
    }
    let point = start_point?;
    [Which::A, Which::B]
        .into_iter()
        .find(|&w| segment.end(w).approx_eq(point))
}

/// Which portal side a route continues from after a transition step.
///
/// A same-floor portal continues on the side the route is not standing on.
/// Otherwise the side on the floor being entered is picked.
pub fn transition_side(portal: &Portal, current: Point, floor: FloorIndex) -> Option<Which> {
    if portal.is_same_floor() {
        if current.approx_eq(portal.side(Which::A)) {
            Some(Which::B)
        } else if current.approx_eq(portal.side(Which::B)) {
            Some(Which::A)
        } else {
            None
        }
    } else if portal.floor_a == floor {
        Some(Which::A)
    } else if portal.floor_b == floor {
        Some(Which::B)
    } else {
        None
    }
}

/// Resolve a segment step into its end point and walking length.
pub fn resolve_segment(
    geometry: &RouteGeometry,
    step: &SolutionStep,
    previous: Point,
) -> Result<(Point, f64)> {
    let segment = geometry.segment(step.floor, step.edge)?;
    let exit = segment_exit(segment, previous).ok_or_else(|| {
        tracing::debug!(
            %previous,
            floor = step.floor,
            segment = step.edge,
            "segment not connected"
        );
        Error::DisconnectedSegment {
            floor: step.floor,
            segment: step.edge,
        }
    })?;
    Ok((segment.end(exit), segment.length))
}

/// Resolve a transition step into the point the next group starts from.
pub fn resolve_transition(
    geometry: &RouteGeometry,
    step: &SolutionStep,
    current: Point,
) -> Result<Point> {
    let portal = geometry.portal(step.edge)?;
    let side = transition_side(portal, current, step.floor).ok_or(Error::TransitionResolution {
        portal: step.edge,
        floor: step.floor,
    })?;
    Ok(portal.side(side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PortalKind;

    fn segment(a: (f64, f64), b: (f64, f64), length: f64) -> PathSegment {
        PathSegment {
            ax: a.0,
            ay: a.1,
            bx: b.0,
            by: b.1,
            length,
            door_a: vec!["D1".into()],
            door_b: vec!["D2".into(), "D3".into()],
        }
    }

    fn portal(floor_a: FloorIndex, a: (f64, f64), floor_b: FloorIndex, b: (f64, f64)) -> Portal {
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

    #[test]
    fn segment_exit_runs_away_from_previous_point() {
        let seg = segment((0.0, 0.0), (10.0, 0.0), 10.0);
        assert_eq!(segment_exit(&seg, Point::new(0.0, 0.0)), Some(Which::B));
        assert_eq!(segment_exit(&seg, Point::new(10.0, 0.0)), Some(Which::A));
    }

    #[test]
    fn segment_away_from_previous_point_has_no_exit() {
        let seg = segment((40.0, 40.0), (60.0, 40.0), 20.0);
        assert_eq!(segment_exit(&seg, Point::new(0.0, 12.0)), None);
    }

    #[test]
    fn origin_by_door_membership() {
        let seg = segment((0.0, 0.0), (10.0, 0.0), 10.0);
        assert_eq!(segment_origin(&seg, "D1", None), Some(Which::A));
        assert_eq!(segment_origin(&seg, "D3", None), Some(Which::B));
        assert_eq!(segment_origin(&seg, "D9", None), None);
    }

    #[test]
    fn origin_falls_back_to_door_midpoint() {
        let seg = segment((0.0, 0.0), (10.0, 0.0), 10.0);
        assert_eq!(
            segment_origin(&seg, "D9", Some(Point::new(10.0, 0.0))),
            Some(Which::B)
        );
    }

    #[test]
    fn same_floor_transition_takes_other_side() {
        let p = portal(0, (5.0, 5.0), 0, (5.0, 15.0));
        assert_eq!(transition_side(&p, Point::new(5.0, 5.0), 0), Some(Which::B));
        assert_eq!(p.side(Which::B), Point::new(5.0, 15.0));
        assert_eq!(transition_side(&p, Point::new(5.0, 15.0), 0), Some(Which::A));
    }

    #[test]
    fn same_floor_transition_off_route_is_unresolved() {
        let p = portal(0, (5.0, 5.0), 0, (5.0, 15.0));
        assert_eq!(transition_side(&p, Point::new(1.0, 1.0), 0), None);
    }

    #[test]
    fn cross_floor_transition_takes_entered_floor() {
        let p = portal(0, (5.0, 5.0), 1, (7.0, 7.0));
        assert_eq!(transition_side(&p, Point::new(5.0, 5.0), 1), Some(Which::B));
        assert_eq!(transition_side(&p, Point::new(7.0, 7.0), 0), Some(Which::A));
        assert_eq!(transition_side(&p, Point::new(5.0, 5.0), 3), None);
    }

    #[test]
    fn unresolvable_transition_is_an_error() {
        let geometry = RouteGeometry {
            paths: Vec::new(),
            portals: vec![portal(0, (0.0, 0.0), 1, (0.0, 0.0))],
        };
        let err = resolve_transition(
            &geometry,
            &SolutionStep::transition(2, 0),
            Point::new(0.0, 0.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::TransitionResolution { portal: 0, floor: 2 }
        ));
    }
}
