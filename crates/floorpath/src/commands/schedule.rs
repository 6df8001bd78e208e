use anyhow::Result;
use colored::Colorize;
use floorpath::animate::timeline;

use crate::cli::RouteArgs;

pub fn run(args: &RouteArgs, json: bool) -> Result<()> {
    let widget = super::routed_widget(args)?;
    let Some(drawing) = widget.drawing() else {
        anyhow::bail!("No route to '{}'", args.to);
    };
    let options = widget.options();
    let slots = timeline(drawing, &options.path, options.pause);

    if json {
        println!("{}", serde_json::to_string_pretty(&slots)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:>5}  {:<12} {:>10} {:>8} {:>8} {:>8}",
            "group", "floor", "length", "begin", "dur", "end"
        )
        .bold()
    );
    for slot in &slots {
        let floor = widget
            .diagrams()
            .get(slot.floor)
            .map_or("?", |d| d.id());
        println!(
            "{:>5}  {:<12} {:>10.1} {:>8} {:>8} {:>8}",
            slot.group, floor, slot.route_length, slot.begin, slot.duration, slot.end
        );
    }
    if let Some(last) = slots.last() {
        println!("{}", format!("Finished at {} ms", last.end).green());
    }
    Ok(())
}
