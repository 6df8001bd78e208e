use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "floorpath";

const VALID_KEYS: &str = "path.color, path.radius, path.speed, path.width, route.accessible, \
    route.zoom, route.zoom_padding, route.pause, route.show_location";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_padding: Option<f64>,

    /// Milliseconds between floor reveals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_location: Option<bool>,
}

const COLOR_PATTERN: &str = r"^(#[0-9a-fA-F]{3}|#[0-9a-fA-F]{6}|[a-zA-Z]+)$";

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be 'true' or 'false'."),
    }
}

fn parse_non_negative(key: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a non-negative number."),
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `floorpath config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# floorpath configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "path.color" => {
                if !Regex::new(COLOR_PATTERN)?.is_match(value) {
                    anyhow::bail!(
                        "Invalid color: {value}. Must be a color name or hex value like '#f00'."
                    );
                }
                self.path.get_or_insert_with(PathConfig::default).color = Some(value.to_string());
            }
            "path.radius" => {
                self.path.get_or_insert_with(PathConfig::default).radius =
                    Some(parse_non_negative(key, value)?);
            }
            "path.speed" => {
                self.path.get_or_insert_with(PathConfig::default).speed =
                    Some(parse_non_negative(key, value)?);
            }
            "path.width" => {
                let width = parse_non_negative(key, value)?;
                if width == 0.0 {
                    anyhow::bail!("Invalid path.width: {value}. Must be greater than zero.");
                }
                self.path.get_or_insert_with(PathConfig::default).width = Some(width);
            }
            "route.accessible" => {
                self.route.get_or_insert_with(RouteConfig::default).accessible =
                    Some(parse_bool(key, value)?);
            }
            "route.zoom" => {
                self.route.get_or_insert_with(RouteConfig::default).zoom =
                    Some(parse_bool(key, value)?);
            }
            "route.zoom_padding" => {
                self.route.get_or_insert_with(RouteConfig::default).zoom_padding =
                    Some(parse_non_negative(key, value)?);
            }
            "route.pause" => {
                let Ok(pause) = value.parse::<u64>() else {
                    anyhow::bail!("Invalid route.pause: {value}. Must be milliseconds.");
                };
                self.route.get_or_insert_with(RouteConfig::default).pause = Some(pause);
            }
            "route.show_location" => {
                self.route.get_or_insert_with(RouteConfig::default).show_location =
                    Some(parse_bool(key, value)?);
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}
