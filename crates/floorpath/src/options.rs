use serde::{Deserialize, Serialize};

use crate::animate::Millis;
use crate::config::Config;

/// Stroke style and timing of the drawn route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    pub color: String,
    /// Corner radius; zero disables smoothing.
    pub radius: f64,
    /// Milliseconds of animation per unit of route length.
    pub speed: f64,
    pub width: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: "red".to_string(),
            radius: 10.0,
            speed: 8.0,
            width: 3.0,
        }
    }
}

impl PathStyle {
    /// Reveal duration for a group of `route_length` units.
    pub fn reveal_duration(&self, route_length: f64) -> Millis {
        (route_length * self.speed).round().max(0.0) as Millis
    }

    pub fn apply(&mut self, update: PathStyleUpdate) {
        if let Some(color) = update.color {
            self.color = color;
        }
        if let Some(radius) = update.radius {
            self.radius = radius;
        }
        if let Some(speed) = update.speed {
            self.speed = speed;
        }
        if let Some(width) = update.width {
            self.width = width;
        }
    }
}

/// Partial path style; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathStyleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorStyle {
    pub fill: String,
    pub height: f64,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            fill: "red".to_string(),
            height: 40.0,
        }
    }
}

/// Per-widget options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WayfindingOptions {
    /// Floor shown first. Falls back to the first floor when unknown.
    pub default_map: Option<String>,
    pub startpoint: String,
    /// Destination routed to right after initialization.
    pub endpoint: Option<String>,
    pub accessible_route: bool,
    pub path: PathStyle,
    pub zoom_to_route: bool,
    pub zoom_padding: f64,
    /// Hold time between a group finishing and the next one starting.
    pub pause: Millis,
    pub show_location: bool,
    pub location_indicator: IndicatorStyle,
    /// Emit [`crate::WidgetEvent::FloorChanged`] on every panel switch.
    pub map_events: bool,
}

impl Default for WayfindingOptions {
    fn default() -> Self {
        Self {
            default_map: None,
            startpoint: "startpoint".to_string(),
            endpoint: None,
            accessible_route: false,
            path: PathStyle::default(),
            zoom_to_route: false,
            zoom_padding: 50.0,
            pause: 1000,
            show_location: false,
            location_indicator: IndicatorStyle::default(),
            map_events: false,
        }
    }
}

impl WayfindingOptions {
    /// Defaults with the user configuration laid over them.
    pub fn with_config(config: &Config) -> Self {
        let mut options = Self::default();
        if let Some(path) = &config.path {
            if let Some(color) = &path.color {
                options.path.color = color.clone();
            }
            if let Some(radius) = path.radius {
                options.path.radius = radius;
            }
            if let Some(speed) = path.speed {
                options.path.speed = speed;
            }
            if let Some(width) = path.width {
                options.path.width = width;
            }
        }
        if let Some(route) = &config.route {
            if let Some(accessible) = route.accessible {
                options.accessible_route = accessible;
            }
            if let Some(zoom) = route.zoom {
                options.zoom_to_route = zoom;
            }
            if let Some(padding) = route.zoom_padding {
                options.zoom_padding = padding;
            }
            if let Some(pause) = route.pause {
                options.pause = pause;
            }
            if let Some(show) = route.show_location {
                options.show_location = show;
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PathConfig, RouteConfig};

    #[test]
    fn defaults_match_widget_defaults() {
        let o = WayfindingOptions::default();
        assert_eq!(o.path.color, "red");
        assert_eq!(o.path.radius, 10.0);
        assert_eq!(o.path.speed, 8.0);
        assert_eq!(o.path.width, 3.0);
        assert_eq!(o.pause, 1000);
        assert_eq!(o.zoom_padding, 50.0);
        assert_eq!(o.startpoint, "startpoint");
        assert_eq!(o.location_indicator.height, 40.0);
    }

    #[test]
    fn reveal_duration_rounds_to_millis() {
        let style = PathStyle::default();
        assert_eq!(style.reveal_duration(12.0), 96);
        assert_eq!(style.reveal_duration(0.06), 0);
        assert_eq!(style.reveal_duration(0.07), 1);
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let mut style = PathStyle::default();
        style.apply(PathStyleUpdate {
            color: Some("#00f".into()),
            speed: Some(2.0),
            ..PathStyleUpdate::default()
        });
        assert_eq!(style.color, "#00f");
        assert_eq!(style.speed, 2.0);
        assert_eq!(style.radius, 10.0);
    }

    #[test]
    fn options_parse_camel_case_json() {
        let o: WayfindingOptions = serde_json::from_str(
            r#"{"defaultMap":"first","zoomToRoute":true,"path":{"speed":4}}"#,
        )
        .unwrap();
        assert_eq!(o.default_map.as_deref(), Some("first"));
        assert!(o.zoom_to_route);
        assert_eq!(o.path.speed, 4.0);
        assert_eq!(o.path.color, "red");
    }

    #[test]
    fn config_overlays_defaults() {
        let config = Config {
            path: Some(PathConfig {
                color: Some("blue".into()),
                ..PathConfig::default()
            }),
            route: Some(RouteConfig {
                zoom: Some(true),
                pause: Some(250),
                ..RouteConfig::default()
            }),
        };
        let o = WayfindingOptions::with_config(&config);
        assert_eq!(o.path.color, "blue");
        assert_eq!(o.path.width, 3.0);
        assert!(o.zoom_to_route);
        assert_eq!(o.pause, 250);
    }
}
