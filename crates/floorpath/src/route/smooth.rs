use crate::model::{DrawOp, DrawingGroup, POINT_EPSILON, Point};

/// Merge collinear runs, then round the remaining corners with `radius`.
///
/// A radius of zero or less leaves the group untouched.
pub fn smooth(group: &mut DrawingGroup, radius: f64) {
    if radius <= 0.0 {
        return;
    }
    let before = group.ops.len();
    merge_collinear(&mut group.ops);
    let merged = group.ops.len();
    round_corners(&mut group.ops, radius);
    tracing::debug!(
        floor = group.floor,
        before,
        merged,
        after = group.ops.len(),
        "smoothed drawing group"
    );
}

/// Drop interior points that sit on a straight run.
///
/// The dropped line's length moves onto the line after it, and the scan starts
/// over from the first interior point.
pub fn merge_collinear(ops: &mut Vec<DrawOp>) {
    let mut i = 1;
    while i + 1 < ops.len() {
        if ops[i].is_line()
            && ops[i + 1].is_line()
            && is_collinear(ops[i - 1].to, ops[i].to, ops[i + 1].to)
        {
            ops[i + 1].length += ops[i].length;
            ops.remove(i);
            i = 1;
        } else {
            i += 1;
        }
    }
}

/// Replace each sharp joint between two lines longer than `radius` with a
/// quadratic curve whose control point is the original corner.
pub fn round_corners(ops: &mut Vec<DrawOp>, radius: f64) {
    let mut i = 1;
    while i + 1 < ops.len() {
        let incoming = ops[i];
        let outgoing = ops[i + 1];
        if !(incoming.is_line()
            && outgoing.is_line()
            && incoming.length > radius
            && outgoing.length > radius)
        {
            i += 1;
            continue;
        }

        let prev = ops[i - 1].to;
        let corner = incoming.to;
        let next = outgoing.to;

        ops[i].to = prev.lerp(corner, (incoming.length - radius) / incoming.length);
        ops[i].length -= radius;

        let end = corner.lerp(next, radius / outgoing.length);
        ops[i + 1].length -= radius;

        ops.insert(i + 1, DrawOp::curve_to(corner, end, incoming.floor));
        // Continue at the shortened outgoing line.
        i += 2;
    }
}

fn is_collinear(prev: Point, corner: Point, next: Point) -> bool {
    let (adx, ady) = (prev.x - corner.x, prev.y - corner.y);
    let (bdx, bdy) = (corner.x - next.x, corner.y - next.y);
    let zero = |v: f64| v.abs() <= POINT_EPSILON;

    if zero(ady) && zero(bdy) {
        return true;
    }
    if zero(adx) && zero(bdx) {
        return true;
    }

    let a_len = adx.hypot(ady);
    let b_len = bdx.hypot(bdy);
    if a_len <= POINT_EPSILON || b_len <= POINT_EPSILON {
        return false;
    }
    let cross = adx * bdy - ady * bdx;
    cross.abs() <= 1e-9 * a_len * b_len
}
