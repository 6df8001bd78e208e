pub mod completion;
pub mod config;
pub mod play;
pub mod render;
pub mod schedule;
pub mod version;

use anyhow::{Context, Result};
use floorpath::config::Config;
use floorpath::{RouteBundle, RouteTable, Wayfinder, WayfindingOptions};

use crate::cli::RouteArgs;

/// Load the bundle, build a widget with the user's configuration and route it.
pub fn routed_widget(args: &RouteArgs) -> Result<Wayfinder<RouteTable>> {
    let json = std::fs::read_to_string(&args.bundle)
        .with_context(|| format!("Failed to read {}", args.bundle.display()))?;
    let bundle = RouteBundle::from_json(&json)
        .with_context(|| format!("Invalid route bundle {}", args.bundle.display()))?;
    let (floors, table) = bundle.into_parts();

    let mut options = WayfindingOptions::with_config(&Config::load_or_default());
    if let Some(from) = &args.from {
        options.startpoint = from.clone();
    }
    if args.accessible {
        options.accessible_route = true;
    }

    let mut widget = Wayfinder::new(floors, options, table)?;
    widget
        .route_to(&args.to)
        .with_context(|| format!("Cannot route from '{}' to '{}'", widget.startpoint(), args.to))?;
    Ok(widget)
}
