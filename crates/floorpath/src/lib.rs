//! Animated drawing of precomputed multi-floor routes on SVG floor plans.
//!
//! A [`RouteIndex`] supplies the edge sequence of a route. [`Wayfinder`] turns
//! it into one smoothed path per floor, attaches the paths to the floor
//! diagrams and reveals them floor by floor on a virtual clock.

pub mod animate;
pub mod config;
pub mod error;
pub mod floor;
pub mod index;
pub mod model;
pub mod options;
pub mod render;
pub mod route;
pub mod state;
pub mod widget;

pub use error::{Error, Result};
pub use floor::{Door, Floor, ViewBox};
pub use index::{RouteBundle, RouteEntry, RouteIndex, RouteTable};
pub use options::{PathStyle, PathStyleUpdate, WayfindingOptions};
pub use state::WidgetEvent;
pub use widget::Wayfinder;
