use std::collections::BTreeSet;
use std::fmt::Write;

use crate::animate::Millis;
use crate::floor::{Floor, ViewBox};
use crate::model::{DrawingGroup, FloorIndex, Point};

use super::path::{bounding_box, path_data};
use super::{indicator, num, xml_escape};

/// A running `stroke-dashoffset` transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    pub start: Millis,
    pub duration: Millis,
    pub from: f64,
    pub to: f64,
}

impl Reveal {
    /// Dash offset at time `now`, linear between `from` and `to`.
    pub fn offset_at(&self, now: Millis) -> f64 {
        if now <= self.start {
            return self.from;
        }
        let elapsed = now - self.start;
        if self.duration == 0 || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed as f64 / self.duration as f64;
        self.from + (self.to - self.from) * t
    }
}

/// The drawn path of one drawing group.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteElement {
    pub group: usize,
    pub floor: FloorIndex,
    pub d: String,
    pub route_length: f64,
    pub bounds: Option<ViewBox>,
    /// `None` renders as `stroke: none`.
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub dash_array: Option<f64>,
    pub dash_offset: f64,
    pub reveal: Option<Reveal>,
}

impl RouteElement {
    pub fn from_group(index: usize, group: &DrawingGroup) -> Self {
        Self {
            group: index,
            floor: group.floor,
            d: path_data(group),
            route_length: group.route_length,
            bounds: bounding_box(group),
            stroke: None,
            stroke_width: None,
            dash_array: None,
            dash_offset: 0.0,
            reveal: None,
        }
    }

    /// Class tag the element is targeted by.
    pub fn class_name(&self) -> String {
        format!("directionPath{}", self.group)
    }

    /// Dash the stroke so the whole path is hidden.
    pub fn conceal(&mut self) {
        self.dash_array = Some(self.route_length);
        self.dash_offset = self.route_length;
        self.reveal = None;
    }

    /// Start the draw-in: dash offset runs from full length to zero.
    pub fn start_reveal(&mut self, now: Millis, duration: Millis) {
        self.reveal = Some(Reveal {
            start: now,
            duration,
            from: self.route_length,
            to: 0.0,
        });
        self.dash_offset = 0.0;
    }

    /// Effective dash offset at `now`.
    pub fn offset_at(&self, now: Millis) -> f64 {
        self.reveal
            .map_or(self.dash_offset, |reveal| reveal.offset_at(now))
    }

    pub fn is_revealed_at(&self, now: Millis) -> bool {
        self.stroke.is_some() && self.offset_at(now) <= 0.0
    }
}

/// Map pin marking the start point.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationIndicator {
    pub at: Point,
    pub d: String,
    pub fill: String,
}

impl LocationIndicator {
    pub fn new(at: Point, height: f64, fill: &str) -> Self {
        Self {
            at,
            d: indicator::pin_path(at, height),
            fill: fill.to_string(),
        }
    }
}

/// Serialization switches for [`FloorDiagram::to_svg`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgOptions {
    /// Time the stroke state is sampled at.
    pub now: Millis,
    /// Emit each reveal as a SMIL `<animate>` instead of its sampled state.
    pub smil: bool,
}

/// Runtime panel for one floor.
#[derive(Debug, Clone)]
pub struct FloorDiagram {
    pub floor: Floor,
    pub visible: bool,
    pub view_box: Option<ViewBox>,
    pub routes: Vec<RouteElement>,
    pub indicator: Option<LocationIndicator>,
    pub highlighted_rooms: BTreeSet<String>,
    saved_view_box: Option<Option<ViewBox>>,
}

impl FloorDiagram {
    pub fn new(floor: Floor) -> Self {
        let view_box = floor.view_box;
        Self {
            floor,
            visible: false,
            view_box,
            routes: Vec::new(),
            indicator: None,
            highlighted_rooms: BTreeSet::new(),
            saved_view_box: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.floor.id
    }

    pub fn attach_route(&mut self, element: RouteElement) {
        self.routes.push(element);
    }

    pub fn clear_routes(&mut self) {
        self.routes.clear();
    }

    pub fn route(&self, group: usize) -> Option<&RouteElement> {
        self.routes.iter().find(|r| r.group == group)
    }

    pub fn route_mut(&mut self, group: usize) -> Option<&mut RouteElement> {
        self.routes.iter_mut().find(|r| r.group == group)
    }

    /// Swap in `view_box`, remembering the current one for [`Self::restore_zoom`].
    pub fn zoom_to(&mut self, view_box: ViewBox) {
        if self.saved_view_box.is_none() {
            self.saved_view_box = Some(self.view_box);
        }
        self.view_box = Some(view_box);
    }

    /// Put back the view box from before the last zoom. Returns false if not zoomed.
    pub fn restore_zoom(&mut self) -> bool {
        match self.saved_view_box.take() {
            Some(previous) => {
                self.view_box = previous;
                true
            }
            None => false,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.saved_view_box.is_some()
    }

    /// Serialize the panel as a standalone SVG document.
    pub fn to_svg(&self, options: SvgOptions) -> String {
        let mut out = String::new();
        let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="{}""#,
            xml_escape(self.id())
        );
        if let Some(vb) = self.view_box {
            let _ = write!(
                out,
                r#" viewBox="{} {} {} {}""#,
                num(vb.x),
                num(vb.y),
                num(vb.width),
                num(vb.height)
            );
        }
        let _ = writeln!(out, ">");

        if let Some(markup) = &self.floor.markup {
            let _ = writeln!(out, "{}", markup.trim_end());
        }

        if !self.highlighted_rooms.is_empty() {
            let _ = writeln!(out, r#"<g id="wayfindingRooms">"#);
            for room in &self.highlighted_rooms {
                let _ = writeln!(
                    out,
                    r#"<g class="wayfindingRoom" data-room="{}"/>"#,
                    xml_escape(room)
                );
            }
            let _ = writeln!(out, "</g>");
        }

        for route in &self.routes {
            write_route(&mut out, route, options);
        }

        if let Some(pin) = &self.indicator {
            let _ = writeln!(
                out,
                r#"<path class="locationIndicator" d="{}" fill="{}" fill-rule="evenodd" stroke="black"/>"#,
                pin.d,
                xml_escape(&pin.fill)
            );
        }

        let _ = writeln!(out, "</svg>");
        out
    }
}

fn write_route(out: &mut String, route: &RouteElement, options: SvgOptions) {
    let stroke = route.stroke.as_deref().unwrap_or("none");
    let _ = write!(
        out,
        r#"<path class="{}" d="{}" fill="none" stroke="{}""#,
        route.class_name(),
        route.d,
        xml_escape(stroke)
    );
    if let Some(width) = route.stroke_width {
        let _ = write!(out, r#" stroke-width="{}""#, num(width));
    }
    if let Some(dash) = route.dash_array {
        let _ = write!(out, r#" stroke-dasharray="{} {}""#, num(dash), num(dash));
    }

    match (options.smil, route.reveal) {
        (true, Some(reveal)) => {
            let _ = writeln!(out, r#" stroke-dashoffset="{}">"#, num(reveal.from));
            let _ = writeln!(
                out,
                r#"<animate attributeName="stroke-dashoffset" from="{}" to="{}" begin="{}ms" dur="{}ms" fill="freeze"/>"#,
                num(reveal.from),
                num(reveal.to),
                reveal.start,
                reveal.duration
            );
            let _ = writeln!(out, "</path>");
        }
        _ => {
            let _ = writeln!(
                out,
                r#" stroke-dashoffset="{}"/>"#,
                num(route.offset_at(options.now))
            );
        }
    }
}
