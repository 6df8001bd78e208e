pub mod diagram;
pub mod indicator;
pub mod path;

pub use diagram::{FloorDiagram, LocationIndicator, Reveal, RouteElement, SvgOptions};

use std::borrow::Cow;

/// Format a coordinate for SVG output.
///
/// Shortest round-trip form: whole numbers print without a fraction, and
/// negative zero prints as `0`.
pub(crate) fn num(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// Escape the five XML special characters for attribute and text content.
pub(crate) fn xml_escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
