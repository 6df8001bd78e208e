use crate::model::{DrawingGroup, Point, RouteGeometry, Solution, StepKind};
use crate::{Error, Result};

use super::resolve::{resolve_segment, resolve_transition, segment_origin};

/// Build one drawing group per floor run of `solution`.
///
/// Group 0 starts at whichever end of the first segment `start` names. Every
/// transition step closes the running group and opens a new one at the portal
/// side the route comes out of.
pub fn assemble(
    geometry: &RouteGeometry,
    solution: &Solution,
    start: &str,
    start_point: Option<Point>,
) -> Result<Vec<DrawingGroup>> {
    let missing_start = || Error::MissingAnchor {
        id: start.to_string(),
    };

    let first = solution.solution.first().ok_or_else(missing_start)?;
    if first.kind != StepKind::Segment {
        return Err(missing_start());
    }

    let segment = geometry.segment(first.floor, first.edge)?;
    let origin = segment_origin(segment, start, start_point).ok_or_else(missing_start)?;

    let mut current = DrawingGroup::starting_at(segment.end(origin), first.floor);
    current.push_line(segment.end(origin.other()), segment.length);

    let mut groups = Vec::with_capacity(solution.transition_count() + 1);

    for step in &solution.solution[1..] {
        // Groups always hold at least their opening move.
        let here = current.last_point().unwrap_or_default();
        match step.kind {
            StepKind::Segment => {
                let (to, length) = resolve_segment(geometry, step, here)?;
                current.push_line(to, length);
            }
            StepKind::Transition => {
                let entry = resolve_transition(geometry, step, here)?;
                let finished =
                    std::mem::replace(&mut current, DrawingGroup::starting_at(entry, step.floor));
                groups.push(finished);
            }
        }
    }
    groups.push(current);

    tracing::debug!(
        groups = groups.len(),
        steps = solution.solution.len(),
        "assembled route"
    );
    Ok(groups)
}
