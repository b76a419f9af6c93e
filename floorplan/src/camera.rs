//! Geometry helpers and the world/screen view transform.
//!
//! World space is the room's fixed coordinate system in pixel-equivalent units
//! (`meters * pixels_per_meter`). Screen space is the pointer coordinate system
//! of the host's drawing surface. [`ViewTransform`] maps world → screen and is
//! kept a finite, uniform-scale similarity; with the default zoom limits every
//! state it can reach is invertible.
//!
//! Points, sizes, rectangles and affines are [`kurbo`]'s. kurbo composes
//! right to left (`a * b` applies `b` first); the `then_*` builders read in
//! application order and are preferred here.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::config::CanvasConfig;
use crate::consts::{DEFAULT_MAX_FIT_ZOOM, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DETERMINANT_EPSILON, ZOOM_NOISE};
use crate::error::TransformError;

/// Whether `affine` can be inverted: every coefficient is finite and
/// `|det| >= 1e-9`.
#[must_use]
pub fn is_invertible(affine: Affine) -> bool {
    affine.is_finite() && affine.determinant().abs() >= DETERMINANT_EPSILON
}

/// The inverse of `affine`, guarded against numerically singular and
/// non-finite matrices.
///
/// # Errors
///
/// [`TransformError::NonInvertible`] when [`is_invertible`] is false.
pub fn checked_inverse(affine: Affine) -> Result<Affine, TransformError> {
    if !is_invertible(affine) {
        return Err(TransformError::NonInvertible { determinant: affine.determinant() });
    }
    Ok(affine.inverse())
}

/// Linear scale factor of a similarity transform (`sqrt(|det|)`).
#[must_use]
pub fn uniform_scale(affine: Affine) -> f64 {
    affine.determinant().abs().sqrt()
}

/// Corners in outline order: top-left, top-right, bottom-right, bottom-left.
#[must_use]
pub fn rect_corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
}

/// Both sides strictly positive (NaN counts as empty).
fn has_area(width: f64, height: f64) -> bool {
    width > 0.0 && height > 0.0
}

/// Pan/zoom state for the floor-plan canvas.
///
/// Holds a single world → screen [`Affine`] plus the zoom limits it is
/// clamped to. The matrix never holds a NaN or infinite coefficient: every
/// mutator rejects such an update and keeps the previous matrix. Its scale
/// stays inside the zoom limits, so it is invertible whenever
/// `min_zoom² >= 1e-9`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    affine: Affine,
    min_zoom: f64,
    max_zoom: f64,
    max_fit_zoom: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM, DEFAULT_MAX_FIT_ZOOM)
    }
}

impl ViewTransform {
    /// Identity transform with the given zoom limits. Swapped bounds are
    /// reordered rather than rejected, and the fit limit is kept inside
    /// `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn with_limits(min_zoom: f64, max_zoom: f64, max_fit_zoom: f64) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom { (min_zoom, max_zoom) } else { (max_zoom, min_zoom) };
        Self { affine: Affine::IDENTITY, min_zoom, max_zoom, max_fit_zoom: max_fit_zoom.min(max_zoom).max(min_zoom) }
    }

    #[must_use]
    pub fn from_config(config: &CanvasConfig) -> Self {
        Self::with_limits(config.min_zoom, config.max_zoom, config.max_fit_zoom)
    }

    #[must_use]
    pub fn affine(&self) -> Affine {
        self.affine
    }

    /// Replace the world → screen matrix.
    ///
    /// # Errors
    ///
    /// Rejects singular or non-finite matrices with
    /// [`TransformError::NonInvertible`] and leaves the current transform
    /// untouched.
    pub fn set_affine(&mut self, affine: Affine) -> Result<(), TransformError> {
        if !is_invertible(affine) {
            return Err(TransformError::NonInvertible { determinant: affine.determinant() });
        }
        self.affine = affine;
        Ok(())
    }

    /// Current uniform zoom factor (screen pixels per world unit).
    #[must_use]
    pub fn scale(&self) -> f64 {
        uniform_scale(self.affine)
    }

    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Largest scale [`ViewTransform::reset`] may pick.
    #[must_use]
    pub fn max_fit_zoom(&self) -> f64 {
        self.max_fit_zoom
    }

    /// Convert a screen-space point to world coordinates.
    ///
    /// # Errors
    ///
    /// [`TransformError::NonInvertible`] when the matrix is degenerate; callers
    /// treat this as "skip this frame".
    pub fn to_world(&self, screen: Point) -> Result<Point, TransformError> {
        Ok(checked_inverse(self.affine)? * screen)
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, world: Point) -> Point {
        self.affine * world
    }

    /// Convert a screen-space distance (pixels) to a world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        let scale = self.scale();
        if scale > 0.0 { screen_dist / scale } else { screen_dist }
    }

    /// Compose a screen-space translation onto the current transform.
    /// Returns `false` (and changes nothing) for a non-finite offset.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        self.commit(self.affine.then_translate(Vec2::new(dx, dy)))
    }

    /// Set the transform to `start` followed by a `(dx, dy)` screen shift.
    ///
    /// Drag-panning calls this every frame with the matrix captured at
    /// pointer-down and the total screen delta so far, so rounding never
    /// accumulates. Returns `false` (and changes nothing) for a non-finite
    /// offset.
    pub fn pan_from(&mut self, start: Affine, dx: f64, dy: f64) -> bool {
        self.commit(start.then_translate(Vec2::new(dx, dy)))
    }

    /// Zoom by `factor` keeping `point` (world space) fixed on screen.
    ///
    /// The resulting scale is clamped to the zoom limits; the effective factor
    /// is recomputed after clamping. Returns `false` (and changes nothing) when
    /// the effective factor is within noise of 1.0, `factor` is not a
    /// positive finite number, or `point` is not finite.
    pub fn zoom_around_world_point(&mut self, point: Point, factor: f64) -> bool {
        if !(factor.is_finite() && factor > 0.0 && point.is_finite()) {
            return false;
        }
        let current = self.scale();
        if current <= 0.0 {
            return false;
        }
        let target = clamp_scale(current * factor, self.min_zoom, self.max_zoom);
        let effective = target / current;
        if (effective - 1.0).abs() < ZOOM_NOISE {
            return false;
        }

        let before = self.to_screen(point);
        let scaled = self.affine.then_scale(effective);
        let drift = before - scaled * point;
        self.commit(scaled.then_translate(drift))
    }

    /// Fit `target` into `viewport`, leaving `padding` (fraction of the
    /// viewport) as margin, and center it.
    ///
    /// # Errors
    ///
    /// [`TransformError::EmptyViewport`] / [`TransformError::EmptyTarget`] when
    /// either has no area; the transform is left unchanged.
    pub fn reset(&mut self, target: Rect, viewport: Size, padding: f64) -> Result<(), TransformError> {
        if !has_area(viewport.width, viewport.height) {
            return Err(TransformError::EmptyViewport { width: viewport.width, height: viewport.height });
        }
        let (width, height) = (target.width(), target.height());
        if !has_area(width, height) {
            return Err(TransformError::EmptyTarget { width, height });
        }
        let usable = 1.0 - padding.clamp(0.0, 0.95);
        let fit_x = viewport.width * usable / width;
        let fit_y = viewport.height * usable / height;
        let s = clamp_scale(fit_x.min(fit_y), self.min_zoom, self.max_fit_zoom);

        let offset = viewport.to_rect().center().to_vec2() - target.center().to_vec2() * s;
        let fitted = Affine::scale(s).then_translate(offset);
        if !fitted.is_finite() {
            return Err(TransformError::NonInvertible { determinant: fitted.determinant() });
        }
        self.affine = fitted;
        Ok(())
    }

    fn commit(&mut self, next: Affine) -> bool {
        if !next.is_finite() {
            return false;
        }
        self.affine = next;
        true
    }
}

fn clamp_scale(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
