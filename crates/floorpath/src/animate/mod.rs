pub mod sequencer;
pub mod switcher;
pub mod timers;

pub use sequencer::{AnimationTask, Phase, RevealSlot, timeline};
pub use timers::{Millis, TimerId, TimerQueue};

use crate::render::FloorDiagram;
use crate::state::{WidgetEvent, WidgetState};

/// Mutable view of a widget handed to the sequencer and switcher.
pub struct Stage<'a> {
    pub state: &'a mut WidgetState,
    pub diagrams: &'a mut [FloorDiagram],
    pub timers: &'a mut TimerQueue<AnimationTask>,
    pub events: &'a mut Vec<WidgetEvent>,
}
