use crate::model::FloorIndex;
use crate::state::WidgetEvent;
use crate::{Error, Result};

use super::Stage;

/// Make `floor` the only visible panel.
pub fn show_floor(stage: &mut Stage<'_>, floor: FloorIndex) {
    for (i, diagram) in stage.diagrams.iter_mut().enumerate() {
        diagram.visible = i == floor;
    }
    stage.state.current_floor = floor;

    let Some(diagram) = stage.diagrams.get(floor) else {
        return;
    };
    tracing::info!(floor = diagram.id(), "showing floor");
    if stage.state.options.map_events {
        stage.events.push(WidgetEvent::FloorChanged {
            floor: diagram.id().to_string(),
        });
    }
}

/// Direct panel selection by floor id.
///
/// When the current drawing has a group on that floor (the last one, if
/// several), its stroke is hidden again and redrawn from the start.
pub fn switch_floor(stage: &mut Stage<'_>, id: &str) -> Result<()> {
    let floor = stage
        .diagrams
        .iter()
        .position(|d| d.id() == id)
        .ok_or_else(|| Error::UnknownFloor {
            floor: id.to_string(),
        })?;

    show_floor(stage, floor);

    let Some(group) = stage
        .state
        .drawing
        .as_ref()
        .and_then(|drawing| drawing.group_on_floor(floor))
    else {
        return Ok(());
    };

    let now = stage.timers.now();
    let style = &stage.state.options.path;
    if let Some(element) = stage.diagrams[floor].route_mut(group) {
        element.stroke = Some(style.color.clone());
        element.stroke_width = Some(style.width);
        element.conceal();
        element.start_reveal(now, style.reveal_duration(element.route_length));
        tracing::debug!(group, floor, "redrawing group after floor switch");
    }
    Ok(())
}
