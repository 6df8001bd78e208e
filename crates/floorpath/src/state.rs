use crate::animate::{Phase, TimerId};
use crate::model::{Drawing, FloorIndex};
use crate::options::WayfindingOptions;

/// Everything one widget instance knows between calls.
#[derive(Debug, Clone)]
pub struct WidgetState {
    pub options: WayfindingOptions,
    pub startpoint: String,
    /// Most recent successful route, kept for floor-switch redraws.
    pub drawing: Option<Drawing>,
    pub current_floor: FloorIndex,
    /// Bumped on every route request and replay.
    pub generation: u64,
    pub phase: Phase,
    /// Timer that advances the running animation.
    pub pending: Option<TimerId>,
}

impl WidgetState {
    pub fn new(options: WayfindingOptions, current_floor: FloorIndex) -> Self {
        Self {
            startpoint: options.startpoint.clone(),
            options,
            drawing: None,
            current_floor,
            generation: 0,
            phase: Phase::Idle,
            pending: None,
        }
    }
}

/// Notifications raised by the widget, drained with `take_events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// The first panel was made visible during initialization.
    MapsVisible { floor: String },
    Ready,
    FloorChanged { floor: String },
    RouteRendered { groups: usize },
    /// Routing to the configured endpoint failed during initialization.
    RouteFailed { destination: String, reason: String },
    GroupRevealStarted { group: usize, floor: String },
    AnimationFinished,
}
