//! Tunable limits for the interaction engine.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FIT_PADDING, DEFAULT_MAX_FIT_ZOOM, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, HANDLE_SIZE_PX, PAN_STEP_PX,
    ROTATE_HANDLE_OFFSET_PX, WHEEL_ZOOM_BASE,
};
use crate::error::ConfigError;

/// Modifier key that turns a primary-button drag into a pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanModifier {
    #[default]
    Ctrl,
    Alt,
    Meta,
    Shift,
}

/// Engine configuration. Every field has a default, so a partial document
/// deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Smallest allowed view scale.
    pub min_zoom: f64,
    /// Largest allowed view scale for interactive zoom.
    pub max_zoom: f64,
    /// Largest view scale `center_on_room` may pick. Must lie within
    /// `[min_zoom, max_zoom]`.
    pub max_fit_zoom: f64,
    /// Margin around the room when centering, as a fraction of the viewport.
    pub fit_padding: f64,
    /// Corner handle side length in screen pixels. Also the minimum on-screen
    /// size an item can be resized down to.
    pub handle_size_px: f64,
    /// Rotate handle distance above the top-right corner, in screen pixels.
    pub rotate_handle_offset_px: f64,
    /// Wheel zoom factor per notch.
    pub wheel_zoom_base: f64,
    /// D-pad pan step in screen pixels.
    pub pan_step_px: f64,
    /// Modifier that pans with the primary button.
    pub pan_modifier: PanModifier,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            max_fit_zoom: DEFAULT_MAX_FIT_ZOOM,
            fit_padding: DEFAULT_FIT_PADDING,
            handle_size_px: HANDLE_SIZE_PX,
            rotate_handle_offset_px: ROTATE_HANDLE_OFFSET_PX,
            wheel_zoom_base: WHEEL_ZOOM_BASE,
            pan_step_px: PAN_STEP_PX,
            pan_modifier: PanModifier::Ctrl,
        }
    }
}

impl CanvasConfig {
    /// Check every field and hand the config back unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("max_fit_zoom", self.max_fit_zoom),
            ("handle_size_px", self.handle_size_px),
            ("rotate_handle_offset_px", self.rotate_handle_offset_px),
            ("wheel_zoom_base", self.wheel_zoom_base),
            ("pan_step_px", self.pan_step_px),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvalidZoomRange { min: self.min_zoom, max: self.max_zoom });
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.max_fit_zoom) {
            return Err(ConfigError::FitZoomOutOfRange {
                fit: self.max_fit_zoom,
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(0.0..0.95).contains(&self.fit_padding) {
            return Err(ConfigError::InvalidPadding(self.fit_padding));
        }
        Ok(self)
    }
}
