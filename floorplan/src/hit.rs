//! Selection handles and scene hit-testing.
//!
//! Handles are laid out around an item's world-space bounding rectangle. Their
//! size is fixed in screen pixels, so it is divided by the current zoom before
//! being compared against world points.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::Serialize;

use crate::camera::{Point, Rect, ViewTransform};
use crate::config::CanvasConfig;
use crate::doc::{ItemId, SceneModel};

/// Corner of a bounding rectangle, named by compass direction in screen
/// orientation (north = smaller y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Corner {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Corner {
    /// Hit-test priority order: top-left, top-right, bottom-right, bottom-left.
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Nw => Self::Se,
            Self::Ne => Self::Sw,
            Self::Se => Self::Nw,
            Self::Sw => Self::Ne,
        }
    }

    /// This corner of `rect`.
    #[must_use]
    pub fn of(self, rect: &Rect) -> Point {
        match self {
            Self::Nw => Point::new(rect.x0, rect.y0),
            Self::Ne => Point::new(rect.x1, rect.y0),
            Self::Se => Point::new(rect.x1, rect.y1),
            Self::Sw => Point::new(rect.x0, rect.y1),
        }
    }
}

/// A selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Resize(Corner),
    Rotate,
}

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Handle),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// Handle layout for one bounding rectangle at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleGeometry {
    bounds: Rect,
    handle_size: f64,
    rotate_offset: f64,
}

impl HandleGeometry {
    /// Lay out handles around `bounds`, converting the configured pixel sizes
    /// to world units at the camera's zoom.
    #[must_use]
    pub fn for_bounds(bounds: Rect, camera: &ViewTransform, config: &CanvasConfig) -> Self {
        Self {
            bounds,
            handle_size: camera.screen_dist_to_world(config.handle_size_px),
            rotate_offset: camera.screen_dist_to_world(config.rotate_handle_offset_px),
        }
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Handle side length in world units.
    #[must_use]
    pub fn handle_size(&self) -> f64 {
        self.handle_size
    }

    #[must_use]
    pub fn corner_center(&self, corner: Corner) -> Point {
        corner.of(&self.bounds)
    }

    /// Square hit area of a corner handle, centered on the corner.
    #[must_use]
    pub fn corner_rect(&self, corner: Corner) -> Rect {
        Rect::from_center_size(self.corner_center(corner), (self.handle_size, self.handle_size))
    }

    /// Center of the rotate handle, offset straight up from the top-right
    /// corner.
    #[must_use]
    pub fn rotate_center(&self) -> Point {
        Point::new(self.bounds.x1, self.bounds.y0 - self.rotate_offset)
    }

    #[must_use]
    pub fn rotate_radius(&self) -> f64 {
        self.handle_size * 0.5
    }

    /// Handle under `world`, if any. The rotate handle wins over corners,
    /// corners are tried in [`Corner::ALL`] order.
    #[must_use]
    pub fn hit_test(&self, world: Point) -> Option<Handle> {
        if world.distance(self.rotate_center()) <= self.rotate_radius() {
            return Some(Handle::Rotate);
        }
        Corner::ALL
            .into_iter()
            .find(|&corner| contains_inclusive(self.corner_rect(corner), world))
            .map(Handle::Resize)
    }

    /// Fixed point of a resize from `corner`: the diagonally opposite corner.
    #[must_use]
    pub fn resize_anchor(&self, corner: Corner) -> Point {
        self.corner_center(corner.opposite())
    }
}

/// Closed-interval containment; kurbo's `Rect::contains` excludes the far
/// edges, which would make a handle's right and bottom borders dead.
fn contains_inclusive(rect: Rect, p: Point) -> bool {
    (rect.x0..=rect.x1).contains(&p.x) && (rect.y0..=rect.y1).contains(&p.y)
}

/// Test what is under `world`: the selected item's handles first, then item
/// bodies from the top of the draw order down.
#[must_use]
pub fn hit_test(world: Point, scene: &SceneModel, camera: &ViewTransform, config: &CanvasConfig) -> Option<Hit> {
    if let Some(selected) = scene.selected() {
        let handles = HandleGeometry::for_bounds(selected.world_bounds(), camera, config);
        if let Some(handle) = handles.hit_test(world) {
            return Some(Hit { item_id: selected.id(), part: HitPart::Handle(handle) });
        }
    }
    scene
        .hit_test(world)
        .map(|item| Hit { item_id: item.id(), part: HitPart::Body })
}
