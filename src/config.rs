//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use floorplan::camera::Size;
use floorplan::config::CanvasConfig;
use floorplan::consts::{
    DEFAULT_MAX_FIT_ZOOM, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_PIXELS_PER_METER, DEFAULT_ROOM_DEPTH_M, DEFAULT_ROOM_WIDTH_M,
};
use floorplan::doc::Room;

use crate::error::HostError;

pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub room: Room,
    pub viewport: Size,
    /// JSON gesture script to replay; the built-in demo runs when absent.
    pub gesture_script: Option<PathBuf>,
    pub canvas: CanvasConfig,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// All optional:
    /// - `ROOM_WIDTH_M`, `ROOM_DEPTH_M`: room size in meters (default 5 x 4)
    /// - `PIXELS_PER_METER`: world units per meter (default 50)
    /// - `VIEWPORT_WIDTH`, `VIEWPORT_HEIGHT`: simulated surface (default 800 x 600)
    /// - `GESTURE_SCRIPT`: path to a JSON gesture script
    /// - `MIN_ZOOM`, `MAX_ZOOM`: interactive zoom limits (default 0.1 / 10);
    ///   the centering limit (default 5) is pulled inside them
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HostError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str, default: f64| parse_or(lookup(key).as_deref(), default);

        let room = Room::new(
            number("ROOM_WIDTH_M", DEFAULT_ROOM_WIDTH_M),
            number("ROOM_DEPTH_M", DEFAULT_ROOM_DEPTH_M),
            number("PIXELS_PER_METER", DEFAULT_PIXELS_PER_METER),
        );
        let viewport = Size::new(
            number("VIEWPORT_WIDTH", DEFAULT_VIEWPORT_WIDTH),
            number("VIEWPORT_HEIGHT", DEFAULT_VIEWPORT_HEIGHT),
        );
        let min_zoom = number("MIN_ZOOM", DEFAULT_MIN_ZOOM);
        let max_zoom = number("MAX_ZOOM", DEFAULT_MAX_ZOOM);
        let canvas = CanvasConfig {
            min_zoom,
            max_zoom,
            max_fit_zoom: DEFAULT_MAX_FIT_ZOOM.min(max_zoom).max(min_zoom),
            ..CanvasConfig::default()
        }
        .validate()?;
        let gesture_script = lookup("GESTURE_SCRIPT")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { room, viewport, gesture_script, canvas })
    }
}

/// Parse a raw variable, falling back to `default` when absent or malformed.
fn parse_or<T>(raw: Option<&str>, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}
