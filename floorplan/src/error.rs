//! Error types for the floorplan crate.
//!
//! None of these ever reach the user directly. The interaction controller
//! absorbs them as skipped events or clamped values; they surface only on the
//! explicit host-facing calls (`center_on_room`, footprint construction,
//! config validation).

/// Failure of a view-transform operation.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TransformError {
    /// The transform's determinant is numerically zero, so screen points
    /// cannot be mapped back into world space.
    #[error("view transform is not invertible (determinant {determinant:e})")]
    NonInvertible { determinant: f64 },

    /// A fit was requested for a viewport with no area.
    #[error("viewport has no area ({width}x{height})")]
    EmptyViewport { width: f64, height: f64 },

    /// A fit was requested for a target region with no area.
    #[error("target region has no area ({width}x{height})")]
    EmptyTarget { width: f64, height: f64 },
}

/// Failure to build a footprint from loader-supplied outline data.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FootprintError {
    /// A polygon needs at least three vertices.
    #[error("footprint polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    /// A vertex or dimension was NaN or infinite.
    #[error("footprint contains a non-finite coordinate")]
    NonFinite,
}

/// Rejected [`crate::config::CanvasConfig`] values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("zoom range is invalid: min {min}, max {max}")]
    InvalidZoomRange { min: f64, max: f64 },

    #[error("max_fit_zoom {fit} must lie within the zoom range [{min}, {max}]")]
    FitZoomOutOfRange { fit: f64, min: f64, max: f64 },

    #[error("fit padding must be in [0, 0.95), got {0}")]
    InvalidPadding(f64),

    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}
