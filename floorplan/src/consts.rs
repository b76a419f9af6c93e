//! Shared numeric constants for the floorplan crate.

// ── Transform ───────────────────────────────────────────────────

/// Determinant magnitude below which a transform is treated as singular.
pub const DETERMINANT_EPSILON: f64 = 1e-9;

/// Zoom factors closer than this to 1.0 are ignored.
pub const ZOOM_NOISE: f64 = 1e-6;

/// Default lower bound on the view scale.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;

/// Default upper bound on the view scale for interactive zoom.
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;

/// Default upper bound on the view scale chosen by fit-to-region.
pub const DEFAULT_MAX_FIT_ZOOM: f64 = 5.0;

/// Default margin left around a region when fitting it to the viewport, as a
/// fraction of the viewport.
pub const DEFAULT_FIT_PADDING: f64 = 0.1;

/// Base of the exponential wheel zoom: one notch scales by this factor.
pub const WHEEL_ZOOM_BASE: f64 = 1.1;

/// D-pad pan step in screen pixels.
pub const PAN_STEP_PX: f64 = 20.0;

// ── Handles ─────────────────────────────────────────────────────

/// Side length of a corner resize handle, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 8.0;

/// Distance from the top-right corner to the rotate handle, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 20.0;

// ── Items ───────────────────────────────────────────────────────

/// Smallest scale factor a pose may carry on either axis.
pub const MIN_POSE_SCALE: f64 = 0.01;

/// Footprint dimensions are clamped up to this before being divided by.
pub const MIN_BASE_DIMENSION: f64 = 1e-6;

/// Bounds for numeric (non-drag) uniform scale edits.
pub const MIN_NUMERIC_SCALE: f64 = 0.0001;
pub const MAX_NUMERIC_SCALE: f64 = 100.0;

// ── Room ────────────────────────────────────────────────────────

pub const DEFAULT_ROOM_WIDTH_M: f64 = 5.0;
pub const DEFAULT_ROOM_DEPTH_M: f64 = 4.0;
pub const DEFAULT_PIXELS_PER_METER: f64 = 50.0;

/// Smallest accepted room side, in meters.
pub const MIN_ROOM_SIDE_M: f64 = 0.1;

/// Smallest accepted pixels-per-meter factor.
pub const MIN_PIXELS_PER_METER: f64 = 1.0;
