//! Scene model: furniture items, their poses, the room, and the ordered store.
//!
//! An [`Item`] pairs an immutable [`Footprint`] (the outline of the model's
//! base in its own centered frame) with a mutable [`Pose`]. Items are values:
//! every edit produces a new `Item` sharing the same footprint, so snapshots
//! handed to observers on other threads never change underneath them.
//!
//! [`SceneModel`] keeps items in draw order (later = on top) together with the
//! current selection and the room the items are placed in.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::sync::Arc;

use kurbo::{BezPath, Shape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Affine, Point, Rect, Vec2, checked_inverse, rect_corners};
use crate::consts::{
    DEFAULT_PIXELS_PER_METER, DEFAULT_ROOM_DEPTH_M, DEFAULT_ROOM_WIDTH_M, MIN_BASE_DIMENSION, MIN_PIXELS_PER_METER,
    MIN_POSE_SCALE, MIN_ROOM_SIDE_M,
};
use crate::error::FootprintError;

/// Unique identifier for a placed item.
pub type ItemId = Uuid;

/// Who an item is, independent of where it currently sits.
///
/// `id` is minted per placement, so two chairs loaded from the same model file
/// are still distinct items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemIdentity {
    pub id: ItemId,
    /// Source model reference (e.g. the model file name).
    pub source_id: String,
    /// Furniture category, e.g. `"chair"`.
    pub category: String,
}

impl ItemIdentity {
    /// New identity with a fresh random id.
    #[must_use]
    pub fn new(source_id: impl Into<String>, category: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), source_id: source_id.into(), category: category.into() }
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const CYAN: Self = Self::rgb(0, 255, 255);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::CYAN
    }
}

/// Closed outline of an item's base, centered on the local origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    vertices: Vec<Point>,
    outline: BezPath,
    bounds: Rect,
}

impl Footprint {
    /// Axis-aligned `width × depth` rectangle centered on the origin.
    ///
    /// Zero sides are accepted; resize math clamps them (see
    /// [`Footprint::base_width`]).
    ///
    /// # Errors
    ///
    /// [`FootprintError::NonFinite`] for NaN or infinite sides.
    pub fn rect(width: f64, depth: f64) -> Result<Self, FootprintError> {
        if !(width.is_finite() && depth.is_finite()) {
            return Err(FootprintError::NonFinite);
        }
        let bounds = Rect::from_center_size(Point::ORIGIN, (width.abs(), depth.abs()));
        Ok(Self::from_vertices(rect_corners(bounds).to_vec()))
    }

    /// Arbitrary simple polygon in the local frame.
    ///
    /// # Errors
    ///
    /// [`FootprintError::TooFewVertices`] below three vertices,
    /// [`FootprintError::NonFinite`] for NaN or infinite coordinates.
    pub fn polygon(vertices: Vec<Point>) -> Result<Self, FootprintError> {
        if vertices.len() < 3 {
            return Err(FootprintError::TooFewVertices { count: vertices.len() });
        }
        if !vertices.iter().all(|p| p.is_finite()) {
            return Err(FootprintError::NonFinite);
        }
        Ok(Self::from_vertices(vertices))
    }

    fn from_vertices(vertices: Vec<Point>) -> Self {
        let outline = closed_path(&vertices);
        let bounds = outline.bounding_box();
        Self { vertices, outline, bounds }
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// The outline as a closed path in the local frame.
    #[must_use]
    pub fn outline(&self) -> &BezPath {
        &self.outline
    }

    /// Local-frame bounding rectangle.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Unscaled width, never below [`MIN_BASE_DIMENSION`].
    #[must_use]
    pub fn base_width(&self) -> f64 {
        self.bounds.width().max(MIN_BASE_DIMENSION)
    }

    /// Unscaled depth, never below [`MIN_BASE_DIMENSION`].
    #[must_use]
    pub fn base_height(&self) -> f64 {
        self.bounds.height().max(MIN_BASE_DIMENSION)
    }
}

fn closed_path(vertices: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = vertices.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Even-odd containment on a closed path.
fn even_odd(path: &BezPath, p: Point) -> bool {
    path.winding(p) % 2 != 0
}

/// Even-odd point-in-polygon test.
#[must_use]
pub fn polygon_contains(vertices: &[Point], p: Point) -> bool {
    vertices.len() >= 3 && even_odd(&closed_path(vertices), p)
}

/// Placement of an item: translation, per-axis scale and rotation (radians).
///
/// Scales are floored at [`MIN_POSE_SCALE`] by every constructor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    tx: f64,
    ty: f64,
    scale_x: f64,
    scale_y: f64,
    rotation: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self { tx: 0.0, ty: 0.0, scale_x: 1.0, scale_y: 1.0, rotation: 0.0 }
    }
}

impl Pose {
    #[must_use]
    pub fn new(tx: f64, ty: f64, scale_x: f64, scale_y: f64, rotation: f64) -> Self {
        Self { tx, ty, scale_x: floor_scale(scale_x), scale_y: floor_scale(scale_y), rotation }
    }

    /// Unit pose translated to `(tx, ty)`.
    #[must_use]
    pub fn at(tx: f64, ty: f64) -> Self {
        Self { tx, ty, ..Self::default() }
    }

    #[must_use]
    pub fn tx(&self) -> f64 {
        self.tx
    }

    #[must_use]
    pub fn ty(&self) -> f64 {
        self.ty
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[must_use]
    pub fn with_translation(self, tx: f64, ty: f64) -> Self {
        Self { tx, ty, ..self }
    }

    #[must_use]
    pub fn with_scale(self, scale_x: f64, scale_y: f64) -> Self {
        Self { scale_x: floor_scale(scale_x), scale_y: floor_scale(scale_y), ..self }
    }

    #[must_use]
    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    /// Local → world transform: scale, then rotate, then translate.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::scale_non_uniform(self.scale_x, self.scale_y)
            .then_rotate(self.rotation)
            .then_translate(Vec2::new(self.tx, self.ty))
    }
}

fn floor_scale(s: f64) -> f64 {
    if s.is_nan() { MIN_POSE_SCALE } else { s.max(MIN_POSE_SCALE) }
}

/// A furniture item placed in the room.
///
/// Equality is identity-only: every posed version of the same placement
/// compares equal.
#[derive(Debug, Clone)]
pub struct Item {
    identity: ItemIdentity,
    footprint: Arc<Footprint>,
    base_largest_dimension: f64,
    color: Rgba,
    pose: Pose,
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Item {}

impl Item {
    /// Item at the unit pose with the default color.
    ///
    /// `base_largest_dimension` is the model's largest unscaled extent, carried
    /// for the 3D preview's normalization.
    #[must_use]
    pub fn new(identity: ItemIdentity, footprint: Footprint, base_largest_dimension: f64) -> Self {
        Self {
            identity,
            footprint: Arc::new(footprint),
            base_largest_dimension,
            color: Rgba::default(),
            pose: Pose::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.identity.id
    }

    #[must_use]
    pub fn identity(&self) -> &ItemIdentity {
        &self.identity
    }

    #[must_use]
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    #[must_use]
    pub fn base_largest_dimension(&self) -> f64 {
        self.base_largest_dimension
    }

    #[must_use]
    pub fn color(&self) -> Rgba {
        self.color
    }

    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Same item with a new pose.
    #[must_use]
    pub fn with_pose(&self, pose: Pose) -> Self {
        Self { pose, ..self.clone() }
    }

    /// Same item with a new color.
    #[must_use]
    pub fn with_color(&self, color: Rgba) -> Self {
        Self { color, ..self.clone() }
    }

    /// Same item translated to `(tx, ty)`.
    #[must_use]
    pub fn translate_to(&self, tx: f64, ty: f64) -> Self {
        self.with_pose(self.pose.with_translation(tx, ty))
    }

    /// Same item moved so its world bounds' top-left corner is at `(x, y)`.
    #[must_use]
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        let bounds = self.world_bounds();
        self.translate_to(self.pose.tx + (x - bounds.x0), self.pose.ty + (y - bounds.y0))
    }

    #[must_use]
    pub fn world_transform(&self) -> Affine {
        self.pose.transform()
    }

    /// Footprint outline in world space.
    #[must_use]
    pub fn world_footprint(&self) -> Vec<Point> {
        let xf = self.world_transform();
        self.footprint.vertices.iter().map(|p| xf * *p).collect()
    }

    /// Axis-aligned bounds of [`Item::world_footprint`].
    #[must_use]
    pub fn world_bounds(&self) -> Rect {
        let mut posed = self.footprint.outline().clone();
        posed.apply_affine(self.world_transform());
        posed.bounding_box()
    }

    /// Whether `world` lies inside the posed footprint (even-odd rule). The
    /// point is mapped into the local frame rather than posing the outline.
    #[must_use]
    pub fn contains(&self, world: Point) -> bool {
        match checked_inverse(self.world_transform()) {
            Ok(to_local) => even_odd(self.footprint.outline(), to_local * world),
            Err(_) => false,
        }
    }
}

/// Rectangular room the items are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub width_m: f64,
    pub depth_m: f64,
    pub pixels_per_meter: f64,
}

impl Default for Room {
    fn default() -> Self {
        Self { width_m: DEFAULT_ROOM_WIDTH_M, depth_m: DEFAULT_ROOM_DEPTH_M, pixels_per_meter: DEFAULT_PIXELS_PER_METER }
    }
}

impl Room {
    /// Room with sides clamped to at least 0.1 m and scale to at least 1 px/m.
    #[must_use]
    pub fn new(width_m: f64, depth_m: f64, pixels_per_meter: f64) -> Self {
        let defaults = Self::default();
        Self {
            width_m: clamp_min(width_m, MIN_ROOM_SIDE_M, defaults.width_m),
            depth_m: clamp_min(depth_m, MIN_ROOM_SIDE_M, defaults.depth_m),
            pixels_per_meter: clamp_min(pixels_per_meter, MIN_PIXELS_PER_METER, defaults.pixels_per_meter),
        }
    }

    /// World-space rectangle `[0, 0, width·ppm, depth·ppm]`.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width_m * self.pixels_per_meter, self.depth_m * self.pixels_per_meter)
    }
}

fn clamp_min(value: f64, min: f64, fallback: f64) -> f64 {
    if value.is_finite() { value.max(min) } else { fallback }
}

/// Ordered item store plus selection and room.
#[derive(Debug, Clone, Default)]
pub struct SceneModel {
    items: Vec<Item>,
    selected: Option<ItemId>,
    room: Room,
}

impl SceneModel {
    #[must_use]
    pub fn new(room: Room) -> Self {
        Self { items: Vec::new(), selected: None, room }
    }

    /// Items in draw order (bottom first).
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Topmost item whose world footprint contains `world`.
    #[must_use]
    pub fn hit_test(&self, world: Point) -> Option<&Item> {
        self.items.iter().rev().find(|item| item.contains(world))
    }

    /// Replace every item. The selection survives only if an item with the
    /// same identity is in the new list. Returns `true` when a selection was
    /// dropped.
    pub fn replace_all(&mut self, items: Vec<Item>) -> bool {
        self.items = items;
        match self.selected {
            Some(id) if self.get(id).is_none() => {
                self.selected = None;
                true
            }
            _ => false,
        }
    }

    /// Append an item on top of the draw order.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove an item, clearing the selection if it was selected.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let idx = self.index_of(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.items.remove(idx))
    }

    /// Drop every item and the selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    /// Copy-on-write pose update; the caller commits the result with
    /// [`SceneModel::commit`].
    #[must_use]
    pub fn update_pose(item: &Item, pose: Pose) -> Item {
        item.with_pose(pose)
    }

    /// Store `item` at the index of the item with the same identity.
    /// Returns `false` if no such item exists.
    pub fn commit(&mut self, item: Item) -> bool {
        let Some(slot) = self.items.iter_mut().find(|existing| **existing == item) else {
            return false;
        };
        *slot = item;
        true
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Item> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Select an item. Returns `true` if the selection changed.
    pub fn select(&mut self, id: ItemId) -> bool {
        if self.selected == Some(id) || self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Clear the selection. Returns `true` if something was selected.
    pub fn deselect(&mut self) -> bool {
        self.selected.take().is_some()
    }

    #[must_use]
    pub fn room(&self) -> Room {
        self.room
    }

    pub fn set_room(&mut self, room: Room) {
        self.room = room;
    }

    /// World-space room rectangle, derived from the current room.
    #[must_use]
    pub fn room_bounds(&self) -> Rect {
        self.room.bounds()
    }
}
