use std::fmt::Write;

use crate::floor::ViewBox;
use crate::model::{DrawOpKind, DrawingGroup, Point};

use super::num;

/// Serialize a drawing group to SVG path data.
///
/// Format: `M0,0L20,0Q30,0 30,10L30,30`
pub fn path_data(group: &DrawingGroup) -> String {
    let mut d = String::new();
    for op in &group.ops {
        match op.kind {
            DrawOpKind::Move => {
                d.clear();
                let _ = write!(d, "M{},{}", num(op.to.x), num(op.to.y));
            }
            DrawOpKind::Line => {
                let _ = write!(d, "L{},{}", num(op.to.x), num(op.to.y));
            }
            DrawOpKind::Curve => {
                let c = op.control.unwrap_or(op.to);
                let _ = write!(
                    d,
                    "Q{},{} {},{}",
                    num(c.x),
                    num(c.y),
                    num(op.to.x),
                    num(op.to.y)
                );
            }
        }
    }
    d
}

/// Tight bounding box of the drawn group, curve bulges included.
pub fn bounding_box(group: &DrawingGroup) -> Option<ViewBox> {
    let first = group.ops.first()?.to;
    let mut bounds = Bounds::at(first);
    let mut pen = first;
    for op in &group.ops[1..] {
        if let (DrawOpKind::Curve, Some(control)) = (op.kind, op.control) {
            for t in [
                quad_extremum(pen.x, control.x, op.to.x),
                quad_extremum(pen.y, control.y, op.to.y),
            ]
            .into_iter()
            .flatten()
            {
                bounds.include(quad_point(pen, control, op.to, t));
            }
        }
        bounds.include(op.to);
        pen = op.to;
    }
    Some(bounds.into_view_box())
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    fn at(p: Point) -> Self {
        Self { min: p, max: p }
    }

    fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    fn into_view_box(self) -> ViewBox {
        ViewBox::new(
            self.min.x,
            self.min.y,
            self.max.x - self.min.x,
            self.max.y - self.min.y,
        )
    }
}

/// Parameter of the turning point of a 1-D quadratic Bézier, if inside (0, 1).
fn quad_extremum(p0: f64, p1: f64, p2: f64) -> Option<f64> {
    let denom = p0 - 2.0 * p1 + p2;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let t = (p0 - p1) / denom;
    (t > 0.0 && t < 1.0).then_some(t)
}

fn quad_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let u = 1.0 - t;
    Point::new(
        u * u * p0.x + 2.0 * u * t * p1.x + t * t * p2.x,
        u * u * p0.y + 2.0 * u * t * p1.y + t * t * p2.y,
    )
}
