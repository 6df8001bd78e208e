use crate::animate::{AnimationTask, Millis, Phase, Stage, TimerQueue, sequencer, switcher};
use crate::floor::{Floor, ensure_unique_ids, find_door};
use crate::index::RouteIndex;
use crate::model::{Drawing, FloorIndex};
use crate::options::{PathStyle, PathStyleUpdate, WayfindingOptions};
use crate::render::{FloorDiagram, LocationIndicator, RouteElement};
use crate::route::{RouteEnds, synthesize};
use crate::state::{WidgetEvent, WidgetState};
use crate::{Error, Result};

/// One wayfinding widget: a set of floor panels plus the route drawn on them.
///
/// Time is virtual. The host moves it forward with [`Wayfinder::advance_to`]
/// or [`Wayfinder::run_until_idle`] and collects notifications with
/// [`Wayfinder::take_events`].
pub struct Wayfinder<I: RouteIndex> {
    index: I,
    floors: Vec<Floor>,
    diagrams: Vec<FloorDiagram>,
    state: WidgetState,
    timers: TimerQueue<AnimationTask>,
    events: Vec<WidgetEvent>,
}

impl<I: RouteIndex> Wayfinder<I> {
    /// Build a widget around a ready route index.
    ///
    /// Routes to `options.endpoint` when one is set. A failure there leaves
    /// the widget without a route and raises [`WidgetEvent::RouteFailed`].
    pub fn new(mut floors: Vec<Floor>, options: WayfindingOptions, index: I) -> Result<Self> {
        if floors.is_empty() {
            return Err(Error::NoFloors);
        }
        if ensure_unique_ids(&mut floors) {
            tracing::warn!("duplicate floor ids, renamed floors to map_<n>");
        }

        let default_floor = match options.default_map.as_deref() {
            None => 0,
            Some(id) => floors.iter().position(|f| f.id == id).unwrap_or_else(|| {
                tracing::warn!(floor = id, "default map not found, showing first floor");
                0
            }),
        };

        let diagrams = floors.iter().cloned().map(FloorDiagram::new).collect();
        let endpoint = options.endpoint.clone();
        let mut widget = Self {
            index,
            floors,
            diagrams,
            state: WidgetState::new(options, default_floor),
            timers: TimerQueue::new(),
            events: Vec::new(),
        };

        switcher::show_floor(&mut widget.stage(), default_floor);
        let shown = widget.diagrams[default_floor].id().to_string();
        widget.events.push(WidgetEvent::MapsVisible { floor: shown });
        widget.place_indicator();
        widget.events.push(WidgetEvent::Ready);

        if let Some(endpoint) = endpoint {
            if let Err(e) = widget.route_to(&endpoint) {
                widget.events.push(WidgetEvent::RouteFailed {
                    destination: endpoint,
                    reason: e.to_string(),
                });
            }
        }
        Ok(widget)
    }

    /// Build the route index from the floors first, then the widget.
    pub fn build<F>(mut floors: Vec<Floor>, options: WayfindingOptions, builder: F) -> Result<Self>
    where
        F: FnOnce(&str, &[Floor]) -> Result<I>,
    {
        ensure_unique_ids(&mut floors);
        let index = builder(&options.startpoint, &floors)?;
        Self::new(floors, options, index)
    }

    fn stage(&mut self) -> Stage<'_> {
        Stage {
            state: &mut self.state,
            diagrams: &mut self.diagrams,
            timers: &mut self.timers,
            events: &mut self.events,
        }
    }

    /// Draw and animate the route from the start point to `destination`.
    ///
    /// On error nothing on screen changes.
    pub fn route_to(&mut self, destination: &str) -> Result<()> {
        let drawing = self.plan(destination).inspect_err(|e| {
            tracing::warn!(
                start = %self.state.startpoint,
                destination,
                error = %e,
                "route request failed"
            );
        })?;
        self.show_route(drawing);
        Ok(())
    }

    /// Validate the request and synthesize its drawing without touching the display.
    fn plan(&self, destination: &str) -> Result<Drawing> {
        let start = self.state.startpoint.as_str();
        if start == destination {
            return Err(Error::EmptyRoute {
                start: start.to_string(),
                destination: destination.to_string(),
            });
        }
        let (_, start_door) = find_door(&self.floors, start).ok_or_else(|| Error::MissingAnchor {
            id: start.to_string(),
        })?;
        if find_door(&self.floors, destination).is_none() {
            return Err(Error::MissingAnchor {
                id: destination.to_string(),
            });
        }

        let solution = self.index.shortest_route(
            &self.floors,
            destination,
            start,
            self.state.options.accessible_route,
        )?;
        let ends = RouteEnds {
            start,
            destination,
            start_point: Some(start_door.midpoint()),
        };
        let drawing = synthesize(
            self.index.geometry(),
            &solution,
            ends,
            self.state.options.path.radius,
        )?;

        if let Some(group) = drawing.groups.iter().find(|g| g.floor >= self.diagrams.len()) {
            return Err(Error::UnknownFloor {
                floor: group.floor.to_string(),
            });
        }
        Ok(drawing)
    }

    fn show_route(&mut self, drawing: Drawing) {
        let destination = drawing.destination.clone();
        for diagram in &mut self.diagrams {
            diagram.clear_routes();
            diagram.highlighted_rooms.clear();
            if diagram.floor.has_room(&destination) {
                diagram.highlighted_rooms.insert(destination.clone());
            }
        }
        for (i, group) in drawing.groups.iter().enumerate() {
            let mut element = RouteElement::from_group(i, group);
            element.conceal();
            self.diagrams[group.floor].attach_route(element);
        }

        let groups = drawing.groups.len();
        tracing::info!(
            start = %drawing.start,
            destination = %destination,
            groups,
            length = drawing.total_length(),
            "route rendered"
        );
        self.state.options.endpoint = Some(destination);
        self.state.drawing = Some(drawing);
        self.events.push(WidgetEvent::RouteRendered { groups });
        sequencer::restart(&mut self.stage());
    }

    /// Id of the visible floor.
    pub fn current_floor(&self) -> &str {
        self.diagrams[self.state.current_floor].id()
    }

    pub fn current_floor_index(&self) -> FloorIndex {
        self.state.current_floor
    }

    pub fn switch_floor(&mut self, id: &str) -> Result<()> {
        switcher::switch_floor(&mut self.stage(), id)
    }

    pub fn path_style(&self) -> &PathStyle {
        &self.state.options.path
    }

    /// Takes effect from the next route request or reveal.
    pub fn update_path_style(&mut self, update: PathStyleUpdate) {
        self.state.options.path.apply(update);
    }

    pub fn accessible_route(&self) -> bool {
        self.state.options.accessible_route
    }

    pub fn set_accessible_route(&mut self, accessible: bool) {
        self.state.options.accessible_route = accessible;
    }

    pub fn startpoint(&self) -> &str {
        &self.state.startpoint
    }

    pub fn set_startpoint(&mut self, id: &str) {
        self.state.startpoint = id.to_string();
        self.place_indicator();
    }

    /// Clear all pins and, when enabled, drop one on the start door.
    fn place_indicator(&mut self) {
        for diagram in &mut self.diagrams {
            diagram.indicator = None;
        }
        if !self.state.options.show_location {
            return;
        }
        let Some((floor, door)) = find_door(&self.floors, &self.state.startpoint) else {
            tracing::debug!(startpoint = %self.state.startpoint, "start door not found, no pin");
            return;
        };
        let style = &self.state.options.location_indicator;
        self.diagrams[floor].indicator = Some(LocationIndicator::new(
            door.midpoint(),
            style.height,
            &style.fill,
        ));
    }

    /// Hide the strokes and animate the current drawing again from the start.
    pub fn replay(&mut self) {
        if self.state.drawing.is_none() {
            return;
        }
        self.hide_path();
        sequencer::restart(&mut self.stage());
    }

    /// Set `stroke: none` on every route element.
    pub fn hide_path(&mut self) {
        for element in self.diagrams.iter_mut().flat_map(|d| d.routes.iter_mut()) {
            element.stroke = None;
        }
    }

    /// Walking length of the route to `destination`, or to the configured endpoint.
    pub fn route_lengths(&self, destination: Option<&str>) -> Result<f64> {
        let destination = destination
            .or(self.state.options.endpoint.as_deref())
            .ok_or(Error::NoDestination)?;
        let solution = self.index.shortest_route(
            &self.floors,
            destination,
            &self.state.startpoint,
            self.state.options.accessible_route,
        )?;
        if solution.solution.is_empty() {
            return Err(Error::EmptyRoute {
                start: self.state.startpoint.clone(),
                destination: destination.to_string(),
            });
        }
        solution.length(self.index.geometry())
    }

    /// The index's route geometry as JSON, for caching.
    pub fn data_store_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.index.geometry())?)
    }

    pub fn options(&self) -> &WayfindingOptions {
        &self.state.options
    }

    pub fn drawing(&self) -> Option<&Drawing> {
        self.state.drawing.as_ref()
    }

    pub fn diagrams(&self) -> &[FloorDiagram] {
        &self.diagrams
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Fire every timer due up to `until`, then move the clock there.
    pub fn advance_to(&mut self, until: Millis) {
        while let Some((_, task)) = self.timers.pop_due(until) {
            sequencer::on_task(&mut self.stage(), task);
        }
        self.timers.advance_clock(until);
    }

    /// Fire timers until none are left.
    pub fn run_until_idle(&mut self) {
        while let Some(deadline) = self.timers.next_deadline() {
            self.advance_to(deadline);
        }
    }

    pub fn take_events(&mut self) -> Vec<WidgetEvent> {
        std::mem::take(&mut self.events)
    }
}
