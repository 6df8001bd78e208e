use serde::Serialize;

use crate::model::{Drawing, FloorIndex};
use crate::options::PathStyle;
use crate::state::WidgetEvent;

use super::{Millis, Stage, switcher};

/// Where the reveal animation stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Revealing {
        group: usize,
    },
    Finished,
}

/// Work item held in the timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationTask {
    /// Leave `group` and enter the next one.
    Advance { generation: u64, group: usize },
}

/// Start a fresh animation of the stored drawing from group 0.
///
/// Any timer of the previous run is cancelled, and its generation retired.
pub fn restart(stage: &mut Stage<'_>) {
    stage.state.generation += 1;
    if let Some(id) = stage.state.pending.take() {
        stage.timers.cancel(id);
    }
    for diagram in stage.diagrams.iter_mut() {
        diagram.restore_zoom();
    }
    enter(stage, 0);
}

/// Enter state `group`: show its floor, hide its stroke and start the reveal.
pub fn enter(stage: &mut Stage<'_>, group: usize) {
    let Some(drawing) = stage.state.drawing.as_ref() else {
        stage.state.phase = Phase::Idle;
        return;
    };
    let Some(floor) = drawing.groups.get(group).map(|g| g.floor) else {
        tracing::debug!(groups = drawing.groups.len(), "route animation finished");
        stage.state.phase = Phase::Finished;
        stage.events.push(WidgetEvent::AnimationFinished);
        return;
    };

    switcher::show_floor(stage, floor);

    let now = stage.timers.now();
    let options = &stage.state.options;
    let pause = options.pause;
    let Some(diagram) = stage.diagrams.get_mut(floor) else {
        return;
    };
    let Some(element) = diagram.route_mut(group) else {
        tracing::warn!(group, floor, "no route element attached for group");
        return;
    };

    element.stroke = Some(options.path.color.clone());
    element.stroke_width = Some(options.path.width);
    element.conceal();
    let duration = options.path.reveal_duration(element.route_length);
    element.start_reveal(now, duration);

    if options.zoom_to_route {
        if let Some(bounds) = element.bounds {
            diagram.zoom_to(bounds.padded(options.zoom_padding));
        }
    }

    tracing::debug!(group, floor, now, duration, "revealing drawing group");
    stage.events.push(WidgetEvent::GroupRevealStarted {
        group,
        floor: diagram.id().to_string(),
    });

    let generation = stage.state.generation;
    let id = stage
        .timers
        .schedule(duration + pause, AnimationTask::Advance { generation, group });
    stage.state.pending = Some(id);
    stage.state.phase = Phase::Revealing { group };
}

/// Handle a fired task. Returns false when the task was stale.
pub fn on_task(stage: &mut Stage<'_>, task: AnimationTask) -> bool {
    match task {
        AnimationTask::Advance { generation, group } => {
            if generation != stage.state.generation {
                tracing::debug!(
                    generation,
                    current = stage.state.generation,
                    "dropping stale animation timer"
                );
                return false;
            }
            stage.state.pending = None;

            let floor = stage
                .state
                .drawing
                .as_ref()
                .and_then(|d| d.groups.get(group))
                .map(|g| g.floor);
            if let Some(diagram) = floor.and_then(|f| stage.diagrams.get_mut(f)) {
                diagram.restore_zoom();
            }

            enter(stage, group + 1);
            true
        }
    }
}

/// One group's slot in the reveal schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealSlot {
    pub group: usize,
    pub floor: FloorIndex,
    pub route_length: f64,
    pub begin: Millis,
    pub duration: Millis,
    /// When the next group starts (or the animation finishes).
    pub end: Millis,
}

/// Reveal schedule of a drawing, relative to the start of the animation.
pub fn timeline(drawing: &Drawing, style: &PathStyle, pause: Millis) -> Vec<RevealSlot> {
    let mut begin = 0;
    drawing
        .groups
        .iter()
        .enumerate()
        .map(|(group, g)| {
            let duration = style.reveal_duration(g.route_length);
            let end = begin + duration + pause;
            let slot = RevealSlot {
                group,
                floor: g.floor,
                route_length: g.route_length,
                begin,
                duration,
                end,
            };
            begin = end;
            slot
        })
        .collect()
}
