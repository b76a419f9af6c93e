//! Interaction controller: pointer events in, item edits and view changes out.
//!
//! [`EngineCore`] owns the scene, the view transform and the gesture state
//! machine. Every handler returns the [`Action`]s it produced, in order, and
//! forwards the scene-level ones to the registered [`SceneObserver`] before
//! returning.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::{debug, trace, warn};

use crate::camera::{Affine, Point, Size, ViewTransform, checked_inverse};
use crate::config::CanvasConfig;
use crate::consts::{MAX_NUMERIC_SCALE, MIN_NUMERIC_SCALE};
use crate::doc::{Item, ItemId, Pose, Rgba, Room, SceneModel};
use crate::error::TransformError;
use crate::hit::{self, Corner, Handle, HandleGeometry, Hit, HitPart};
use crate::input::{Button, Cursor, InputState, InteractionMode, Modifiers, PanDirection, WheelDelta};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ItemSelected(Item),
    ItemDeselected,
    /// The item's pose changed; carries the updated snapshot.
    ItemPoseChanged(Item),
    ItemColorChanged(Item),
    ItemAdded(Item),
    ItemRemoved(ItemId),
    /// Every item was swapped out; carries the new list in draw order.
    ItemsReplaced(Vec<Item>),
    RoomChanged(Room),
    SetCursor(Cursor),
    /// The view transform changed.
    ViewChanged,
    RenderNeeded,
}

/// Receiver for scene changes, typically the 3D preview.
///
/// Every method defaults to doing nothing. Callbacks run synchronously inside
/// the event handler that caused them and receive owned-snapshot references,
/// so an implementation may clone and ship them to another thread.
pub trait SceneObserver: Send {
    fn item_selected(&mut self, _item: &Item) {}
    fn item_deselected(&mut self) {}
    fn item_pose_changed(&mut self, _item: &Item) {}
    fn item_color_changed(&mut self, _item: &Item) {}
    fn item_added(&mut self, _item: &Item) {}
    fn item_removed(&mut self, _id: ItemId) {}
    fn items_replaced(&mut self, _items: &[Item]) {}
    fn room_changed(&mut self, _room: Room) {}
}

/// Core engine state: scene, view, gesture and configuration.
pub struct EngineCore {
    pub scene: SceneModel,
    pub camera: ViewTransform,
    pub input: InputState,
    config: CanvasConfig,
    viewport: Option<Size>,
    observer: Option<Box<dyn SceneObserver>>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(CanvasConfig::default(), Room::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: CanvasConfig, room: Room) -> Self {
        Self {
            scene: SceneModel::new(room),
            camera: ViewTransform::from_config(&config),
            input: InputState::Idle,
            config,
            viewport: None,
            observer: None,
        }
    }

    /// Register the observer that mirrors scene changes, replacing any
    /// previous one.
    pub fn set_observer(&mut self, observer: Box<dyn SceneObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        self.scene.items()
    }

    /// The currently selected item, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&Item> {
        self.scene.selected()
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.input.mode()
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Size> {
        self.viewport
    }

    /// Record the host surface size; used to find the view center.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = Some(viewport);
    }

    // --- Scene inputs ---

    /// Replace every item. A selection whose item disappeared is cleared, and
    /// a gesture on a vanished item is abandoned.
    pub fn set_items(&mut self, items: Vec<Item>) -> Vec<Action> {
        let dropped = self.scene.replace_all(items);
        self.abandon_gesture_if_gone();
        let mut actions = vec![Action::ItemsReplaced(self.scene.items().to_vec())];
        if dropped {
            actions.push(Action::ItemDeselected);
        }
        actions.push(Action::RenderNeeded);
        debug!(count = self.scene.len(), dropped_selection = dropped, "items replaced");
        self.notify(actions)
    }

    /// Append an item on top of the draw order.
    pub fn add_item(&mut self, item: Item) -> Vec<Action> {
        debug!(id = %item.id(), category = %item.identity().category, "item added");
        self.scene.push(item.clone());
        self.notify(vec![Action::ItemAdded(item), Action::RenderNeeded])
    }

    /// Append an item translated to the world point under the viewport
    /// center, or the room center when there is no usable view.
    pub fn add_item_at_view_center(&mut self, item: Item) -> Vec<Action> {
        let at = self.view_center_world();
        self.add_item(item.translate_to(at.x, at.y))
    }

    pub fn remove_item(&mut self, id: ItemId) -> Vec<Action> {
        let was_selected = self.scene.selected_id() == Some(id);
        if self.scene.remove(id).is_none() {
            return Vec::new();
        }
        self.abandon_gesture_if_gone();
        let mut actions = vec![Action::ItemRemoved(id)];
        if was_selected {
            actions.push(Action::ItemDeselected);
        }
        actions.push(Action::RenderNeeded);
        debug!(%id, "item removed");
        self.notify(actions)
    }

    pub fn clear_items(&mut self) -> Vec<Action> {
        if self.scene.is_empty() {
            return Vec::new();
        }
        let had_selection = self.scene.selected_id().is_some();
        let removed: Vec<ItemId> = self.scene.items().iter().map(Item::id).collect();
        self.scene.clear();
        self.input = InputState::Idle;
        let mut actions: Vec<Action> = removed.into_iter().map(Action::ItemRemoved).collect();
        if had_selection {
            actions.push(Action::ItemDeselected);
        }
        actions.push(Action::RenderNeeded);
        self.notify(actions)
    }

    /// Change the room. Out-of-range values are clamped.
    pub fn set_room_dimensions(&mut self, width_m: f64, depth_m: f64, pixels_per_meter: f64) -> Vec<Action> {
        let room = Room::new(width_m, depth_m, pixels_per_meter);
        debug!(width_m = room.width_m, depth_m = room.depth_m, ppm = room.pixels_per_meter, "room resized");
        self.scene.set_room(room);
        self.notify(vec![Action::RoomChanged(room), Action::RenderNeeded])
    }

    /// Programmatically select an item.
    pub fn select(&mut self, id: ItemId) -> Vec<Action> {
        if !self.scene.select(id) {
            return Vec::new();
        }
        let actions = self.scene.get(id).cloned().map(Action::ItemSelected).into_iter().collect();
        self.notify(actions)
    }

    pub fn deselect(&mut self) -> Vec<Action> {
        if !self.scene.deselect() {
            return Vec::new();
        }
        self.notify(vec![Action::ItemDeselected])
    }

    // --- Navigation ---

    /// Zoom by `factor` around the room center.
    pub fn zoom_by(&mut self, factor: f64) -> Vec<Action> {
        let pivot = self.scene.room_bounds().center();
        if self.camera.zoom_around_world_point(pivot, factor) {
            trace!(factor, scale = self.camera.scale(), "zoom");
            vec![Action::ViewChanged]
        } else {
            Vec::new()
        }
    }

    /// Wheel zoom: each notch down zooms out by the configured base.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        if !delta.dy.is_finite() {
            return Vec::new();
        }
        self.zoom_by(self.config.wheel_zoom_base.powf(-delta.dy))
    }

    /// Nudge the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        if !(dx.is_finite() && dy.is_finite()) || (dx == 0.0 && dy == 0.0) {
            return Vec::new();
        }
        if self.camera.pan_by(dx, dy) { vec![Action::ViewChanged] } else { Vec::new() }
    }

    /// One D-pad step.
    pub fn pan_step(&mut self, direction: PanDirection) -> Vec<Action> {
        let (dx, dy) = direction.offset(self.config.pan_step_px);
        self.pan_by(dx, dy)
    }

    /// Fit the room into `viewport` with the configured padding.
    ///
    /// # Errors
    ///
    /// [`TransformError::EmptyViewport`] for a zero-area viewport; the view
    /// is left unchanged.
    pub fn center_on_room(&mut self, viewport: Size) -> Result<Vec<Action>, TransformError> {
        self.camera.reset(self.scene.room_bounds(), viewport, self.config.fit_padding)?;
        self.viewport = Some(viewport);
        debug!(scale = self.camera.scale(), "centered on room");
        Ok(vec![Action::ViewChanged])
    }

    // --- Numeric edits of the selection ---

    /// Set a uniform scale on the selected item, clamped to the numeric range.
    pub fn set_selected_scale(&mut self, scale: f64) -> Vec<Action> {
        if !scale.is_finite() {
            return Vec::new();
        }
        let Some(item) = self.scene.selected() else {
            return Vec::new();
        };
        let scale = scale.max(MIN_NUMERIC_SCALE).min(MAX_NUMERIC_SCALE);
        let updated = SceneModel::update_pose(item, item.pose().with_scale(scale, scale));
        let actions = self.commit_pose(updated);
        self.notify(actions)
    }

    /// Move the selected item so its world bounds start at `(x, y)`.
    pub fn move_selected_to(&mut self, x: f64, y: f64) -> Vec<Action> {
        if !(x.is_finite() && y.is_finite()) {
            return Vec::new();
        }
        let Some(updated) = self.scene.selected().map(|item| item.moved_to(x, y)) else {
            return Vec::new();
        };
        let actions = self.commit_pose(updated);
        self.notify(actions)
    }

    pub fn set_selected_color(&mut self, color: Rgba) -> Vec<Action> {
        let Some(updated) = self.scene.selected().map(|item| item.with_color(color)) else {
            return Vec::new();
        };
        if !self.scene.commit(updated.clone()) {
            return Vec::new();
        }
        self.notify(vec![Action::ItemColorChanged(updated)])
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if !screen.is_finite() {
            debug!(?button, "non-finite pointer down skipped");
            return Vec::new();
        }
        if button == Button::Secondary || modifiers.holds(self.config.pan_modifier) {
            self.input = InputState::Panning { start_screen: screen, start_affine: self.camera.affine() };
            return vec![Action::SetCursor(Cursor::Move)];
        }
        if button != Button::Primary {
            self.input = InputState::Idle;
            return Vec::new();
        }
        let Some(world) = self.world_point(screen) else {
            return Vec::new();
        };

        let actions = match hit::hit_test(world, &self.scene, &self.camera, &self.config) {
            Some(Hit { item_id, part: HitPart::Handle(Handle::Resize(corner)) }) => self.begin_resize(item_id, corner),
            Some(Hit { item_id, part: HitPart::Handle(Handle::Rotate) }) => self.begin_rotate(item_id, world),
            Some(Hit { item_id, part: HitPart::Body }) => self.begin_move(item_id, world),
            None => {
                self.input = InputState::Idle;
                if self.scene.deselect() { vec![Action::ItemDeselected] } else { Vec::new() }
            }
        };
        self.notify(actions)
    }

    pub fn on_pointer_move(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Action> {
        if !screen.is_finite() {
            trace!("non-finite pointer move skipped");
            return Vec::new();
        }
        if let InputState::Panning { start_screen, start_affine } = self.input {
            let delta = screen - start_screen;
            if self.camera.pan_from(start_affine, delta.x, delta.y) {
                return vec![Action::ViewChanged];
            }
            return Vec::new();
        }
        if matches!(self.input, InputState::Idle) {
            return Vec::new();
        }
        let Some(world) = self.world_point(screen) else {
            return Vec::new();
        };
        let actions = match self.input {
            InputState::Moving { id, last_world } => self.drag_move(id, last_world, world),
            InputState::Resizing { id, corner, anchor, anchor_local, snapshot } => {
                self.drag_resize(id, corner, anchor, anchor_local, snapshot, world)
            }
            InputState::Rotating { id, center, snapshot, .. } => self.drag_rotate(id, center, snapshot, world),
            InputState::Idle | InputState::Panning { .. } => Vec::new(),
        };
        self.notify(actions)
    }

    /// End the active gesture. Poses were already emitted during the drag.
    pub fn on_pointer_up(&mut self, _screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let finished = std::mem::take(&mut self.input);
        match finished {
            InputState::Idle => Vec::new(),
            InputState::Rotating { id, start_angle, .. } => {
                if let Some(item) = self.scene.get(id) {
                    debug!(%id, start_angle, end_angle = item.pose().rotation(), "rotate finished");
                }
                vec![Action::SetCursor(Cursor::Default)]
            }
            other => {
                trace!(mode = ?other.mode(), "gesture finished");
                vec![Action::SetCursor(Cursor::Default)]
            }
        }
    }

    // --- Gestures ---

    fn begin_move(&mut self, id: ItemId, world: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.scene.select(id) {
            if let Some(item) = self.scene.get(id) {
                debug!(%id, "item selected");
                actions.push(Action::ItemSelected(item.clone()));
            }
        }
        self.input = InputState::Moving { id, last_world: world };
        actions.push(Action::SetCursor(Cursor::Move));
        actions
    }

    fn begin_resize(&mut self, id: ItemId, corner: Corner) -> Vec<Action> {
        let Some(item) = self.scene.get(id) else {
            return Vec::new();
        };
        let handles = HandleGeometry::for_bounds(item.world_bounds(), &self.camera, &self.config);
        let anchor = handles.resize_anchor(corner);
        let local = match checked_inverse(item.world_transform()) {
            Ok(inverse) => inverse * anchor,
            Err(err) => {
                warn!(%id, error = %err, "item pose is not invertible; resize skipped");
                return Vec::new();
            }
        };
        self.input = InputState::Resizing { id, corner, anchor, anchor_local: local, snapshot: item.pose() };
        vec![Action::SetCursor(Cursor::for_corner(corner))]
    }

    fn begin_rotate(&mut self, id: ItemId, world: Point) -> Vec<Action> {
        let Some(item) = self.scene.get(id) else {
            return Vec::new();
        };
        let center = item.world_bounds().center();
        self.input =
            InputState::Rotating { id, center, start_angle: (world - center).atan2(), snapshot: item.pose() };
        vec![Action::SetCursor(Cursor::Grab)]
    }

    fn drag_move(&mut self, id: ItemId, last_world: Point, world: Point) -> Vec<Action> {
        let Some(item) = self.scene.get(id) else {
            return Vec::new();
        };
        let delta = world - last_world;
        let pose = item.pose();
        let updated = item.translate_to(pose.tx() + delta.x, pose.ty() + delta.y);
        self.input = InputState::Moving { id, last_world: world };
        self.commit_pose(updated)
    }

    /// Scale so the dragged corner follows the pointer while the anchor
    /// corner stays put. Width and height are measured in the pose's
    /// un-rotated frame about the anchor.
    fn drag_resize(
        &mut self,
        id: ItemId,
        corner: Corner,
        anchor: Point,
        anchor_local: Point,
        snapshot: Pose,
        world: Point,
    ) -> Vec<Action> {
        let Some(item) = self.scene.get(id) else {
            return Vec::new();
        };
        let mouse = Affine::rotate_about(-snapshot.rotation(), anchor) * world;
        let (width, height) = match corner {
            Corner::Nw => (anchor.x - mouse.x, anchor.y - mouse.y),
            Corner::Ne => (mouse.x - anchor.x, anchor.y - mouse.y),
            Corner::Se => (mouse.x - anchor.x, mouse.y - anchor.y),
            Corner::Sw => (anchor.x - mouse.x, mouse.y - anchor.y),
        };
        let min_side = self.camera.screen_dist_to_world(self.config.handle_size_px);
        let footprint = item.footprint();
        let scaled = snapshot.with_scale(
            width.max(min_side) / footprint.base_width(),
            height.max(min_side) / footprint.base_height(),
        );
        let drifted = scaled.transform() * anchor_local;
        let pose = scaled.with_translation(snapshot.tx() + anchor.x - drifted.x, snapshot.ty() + anchor.y - drifted.y);
        let updated = SceneModel::update_pose(item, pose);
        self.commit_pose(updated)
    }

    fn drag_rotate(&mut self, id: ItemId, center: Point, snapshot: Pose, world: Point) -> Vec<Action> {
        let Some(item) = self.scene.get(id) else {
            return Vec::new();
        };
        let updated = SceneModel::update_pose(item, snapshot.with_rotation((world - center).atan2()));
        self.commit_pose(updated)
    }

    // --- Helpers ---

    fn world_point(&self, screen: Point) -> Option<Point> {
        match self.camera.to_world(screen) {
            Ok(world) => Some(world),
            Err(err) => {
                debug!(error = %err, "pointer event skipped");
                None
            }
        }
    }

    fn view_center_world(&self) -> Point {
        let room_center = self.scene.room_bounds().center();
        match self.viewport {
            Some(viewport) if viewport.width > 0.0 && viewport.height > 0.0 => self
                .world_point(viewport.to_rect().center())
                .filter(|p| p.is_finite())
                .unwrap_or(room_center),
            _ => room_center,
        }
    }

    fn commit_pose(&mut self, updated: Item) -> Vec<Action> {
        if self.scene.commit(updated.clone()) {
            vec![Action::ItemPoseChanged(updated)]
        } else {
            Vec::new()
        }
    }

    fn abandon_gesture_if_gone(&mut self) {
        if let Some(id) = self.input.target() {
            if self.scene.get(id).is_none() {
                debug!(%id, "gesture target removed; back to idle");
                self.input = InputState::Idle;
            }
        }
    }

    /// Forward scene actions to the observer, then hand them back.
    fn notify(&mut self, actions: Vec<Action>) -> Vec<Action> {
        if let Some(observer) = self.observer.as_mut() {
            for action in &actions {
                match action {
                    Action::ItemSelected(item) => observer.item_selected(item),
                    Action::ItemDeselected => observer.item_deselected(),
                    Action::ItemPoseChanged(item) => observer.item_pose_changed(item),
                    Action::ItemColorChanged(item) => observer.item_color_changed(item),
                    Action::ItemAdded(item) => observer.item_added(item),
                    Action::ItemRemoved(id) => observer.item_removed(*id),
                    Action::ItemsReplaced(items) => observer.items_replaced(items),
                    Action::RoomChanged(room) => observer.room_changed(*room),
                    Action::SetCursor(_) | Action::ViewChanged | Action::RenderNeeded => {}
                }
            }
        }
        actions
    }
}
