use std::fmt::Write;

use crate::model::Point;

use super::num;

/// Path data for a map pin whose tip sits at `at`.
///
/// The pin is `height` tall and `height * 5/8` wide, with a round hole in
/// its head (drawn with the even-odd fill rule).
pub fn pin_path(at: Point, height: f64) -> String {
    let width = height * 5.0 / 8.0;
    let mut d = String::new();
    let _ = write!(d, "M {} {}", num(at.x), num(at.y));
    // Diagonal up to the head.
    let _ = write!(d, " l {} {}", num(width / 2.0), num(height * -2.0 / 3.0));
    // Arc over the top and close back down to the tip.
    let _ = write!(
        d,
        " a {} {} 0 0 0 {} 0 Z",
        num(width / 2.0),
        num(height / 3.0),
        num(-width)
    );
    // Hole in the head.
    let _ = write!(d, " m {} {}", num(height / -8.0), num(height * -2.0 / 3.0));
    let r = num(height / 8.0);
    let _ = write!(d, " a {r} {r} 0 1 0 {} 0", num(height / 4.0));
    let _ = write!(d, " a {r} {r} 0 1 0 {} 0", num(height / -4.0));
    d
}
