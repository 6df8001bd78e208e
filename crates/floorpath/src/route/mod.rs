pub mod assemble;
pub mod resolve;
pub mod smooth;

#[cfg(test)]
mod tests;

use crate::model::{Drawing, Point, RouteGeometry, Solution};
use crate::{Error, Result};

use assemble::assemble;
use smooth::smooth;

/// Endpoints of one route request.
#[derive(Debug, Clone, Copy)]
pub struct RouteEnds<'a> {
    pub start: &'a str,
    pub destination: &'a str,
    /// Midpoint of the start door, used when segment door names do not match.
    pub start_point: Option<Point>,
}

/// Turn a solution into smoothed per-floor drawing groups.
///
/// # Arguments
/// * `geometry`: Segment and portal records the solution refers to.
/// * `solution`: Edge sequence from the route index.
/// * `ends`: Start and destination ids of the request.
/// * `radius`: Corner radius; zero disables smoothing.
pub fn synthesize(
    geometry: &RouteGeometry,
    solution: &Solution,
    ends: RouteEnds<'_>,
    radius: f64,
) -> Result<Drawing> {
    if solution.solution.is_empty() {
        return Err(Error::EmptyRoute {
            start: ends.start.to_string(),
            destination: ends.destination.to_string(),
        });
    }

    let mut groups = assemble(geometry, solution, ends.start, ends.start_point)?;
    for group in &mut groups {
        smooth(group, radius);
    }

    Ok(Drawing {
        start: ends.start.to_string(),
        destination: ends.destination.to_string(),
        groups,
    })
}
