use anyhow::{Context, Result};
use colored::Colorize;
use floorpath::{RouteTable, Wayfinder, WidgetEvent};
use std::time::Duration;

use crate::cli::RouteArgs;

/// Play the animation against the wall clock, scaled by `rate`.
pub fn run(args: &RouteArgs, rate: f64) -> Result<()> {
    let widget = super::routed_widget(args)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(play(widget, rate));
    Ok(())
}

async fn play(mut widget: Wayfinder<RouteTable>, rate: f64) {
    report(&mut widget);
    while let Some(deadline) = widget.next_deadline() {
        let wait = (deadline - widget.now()) as f64 / rate;
        tokio::time::sleep(Duration::from_secs_f64(wait / 1000.0)).await;
        widget.advance_to(deadline);
        report(&mut widget);
    }
}

fn report(widget: &mut Wayfinder<RouteTable>) {
    let now = widget.now();
    for event in widget.take_events() {
        let line = match event {
            WidgetEvent::MapsVisible { floor } => format!("showing {floor}"),
            WidgetEvent::Ready => "ready".to_string(),
            WidgetEvent::FloorChanged { floor } => format!("floor changed to {floor}"),
            WidgetEvent::RouteRendered { groups } => format!("route drawn in {groups} part(s)"),
            WidgetEvent::RouteFailed {
                destination,
                reason,
            } => format!("{} {destination}: {reason}", "no route to".yellow()),
            WidgetEvent::GroupRevealStarted { group, floor } => {
                format!("drawing part {} on {floor}", group + 1)
            }
            WidgetEvent::AnimationFinished => {
                println!("{:>7} {}", format!("{now}ms").dimmed(), "done".green().bold());
                continue;
            }
        };
        println!("{:>7} {line}", format!("{now}ms").dimmed());
    }
}
