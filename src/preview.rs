//! Preview mirror: a background task that follows scene changes.
//!
//! The engine calls its observer synchronously from the input path. The
//! [`ChannelObserver`] turns each callback into a [`PreviewUpdate`] on an
//! unbounded channel so the input path never waits on the consumer. The task
//! at the other end folds updates into a [`PreviewMirror`], standing in for
//! the 3D view, and hands the final state back when the channel closes.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use std::collections::HashMap;

use floorplan::doc::{Item, ItemId, Pose, Rgba, Room};
use floorplan::engine::SceneObserver;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// One scene change, carrying an owned item snapshot.
#[derive(Debug, Clone)]
pub enum PreviewUpdate {
    Selected(Item),
    Deselected,
    PoseChanged(Item),
    ColorChanged(Item),
    Added(Item),
    Removed(ItemId),
    Replaced(Vec<Item>),
    RoomChanged(Room),
}

/// Engine observer that forwards every callback onto a channel.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<PreviewUpdate>,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<PreviewUpdate>) -> Self {
        Self { tx }
    }

    fn forward(&self, update: PreviewUpdate) {
        if self.tx.send(update).is_err() {
            warn!("preview channel closed; update dropped");
        }
    }
}

impl SceneObserver for ChannelObserver {
    fn item_selected(&mut self, item: &Item) {
        self.forward(PreviewUpdate::Selected(item.clone()));
    }

    fn item_deselected(&mut self) {
        self.forward(PreviewUpdate::Deselected);
    }

    fn item_pose_changed(&mut self, item: &Item) {
        self.forward(PreviewUpdate::PoseChanged(item.clone()));
    }

    fn item_color_changed(&mut self, item: &Item) {
        self.forward(PreviewUpdate::ColorChanged(item.clone()));
    }

    fn item_added(&mut self, item: &Item) {
        self.forward(PreviewUpdate::Added(item.clone()));
    }

    fn item_removed(&mut self, id: ItemId) {
        self.forward(PreviewUpdate::Removed(id));
    }

    fn items_replaced(&mut self, items: &[Item]) {
        self.forward(PreviewUpdate::Replaced(items.to_vec()));
    }

    fn room_changed(&mut self, room: Room) {
        self.forward(PreviewUpdate::RoomChanged(room));
    }
}

/// Per-item state as last seen by the preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirroredItem {
    pub category: String,
    pub pose: Pose,
    pub color: Rgba,
}

/// Everything the preview knows about the scene.
#[derive(Debug, Default)]
pub struct PreviewMirror {
    items: HashMap<ItemId, MirroredItem>,
    selected: Option<ItemId>,
    room: Option<Room>,
    updates: usize,
}

impl PreviewMirror {
    pub fn apply(&mut self, update: PreviewUpdate) {
        self.updates += 1;
        match update {
            PreviewUpdate::Selected(item) => {
                self.selected = Some(item.id());
                self.track(&item);
            }
            PreviewUpdate::Deselected => self.selected = None,
            PreviewUpdate::PoseChanged(item) | PreviewUpdate::ColorChanged(item) | PreviewUpdate::Added(item) => {
                self.track(&item);
            }
            PreviewUpdate::Removed(id) => self.forget(id),
            PreviewUpdate::Replaced(items) => {
                self.items.clear();
                for item in &items {
                    self.track(item);
                }
                if self.selected.is_some_and(|id| !self.items.contains_key(&id)) {
                    self.selected = None;
                }
            }
            PreviewUpdate::RoomChanged(room) => self.room = Some(room),
        }
    }

    fn forget(&mut self, id: ItemId) {
        self.items.remove(&id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    fn track(&mut self, item: &Item) {
        self.items.insert(
            item.id(),
            MirroredItem { category: item.identity().category.clone(), pose: item.pose(), color: item.color() },
        );
    }

    #[must_use]
    pub fn selected(&self) -> Option<ItemId> {
        self.selected
    }

    /// Total updates received.
    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Number of items currently in the preview.
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.items.len()
    }

    /// Last room reported by the engine, if it changed during the session.
    #[must_use]
    pub fn room(&self) -> Option<Room> {
        self.room
    }

    #[must_use]
    pub fn items(&self) -> &HashMap<ItemId, MirroredItem> {
        &self.items
    }
}

/// Spawn the preview task. It runs until every sender (including the
/// returned observer) is dropped, then yields the final mirror.
#[must_use]
pub fn spawn_preview() -> (ChannelObserver, JoinHandle<PreviewMirror>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(async move {
        let mut mirror = PreviewMirror::default();
        while let Some(update) = rx.recv().await {
            debug!(?update, "preview update");
            mirror.apply(update);
        }
        info!(updates = mirror.updates(), items = mirror.tracked(), "preview channel closed");
        mirror
    });
    (ChannelObserver::new(tx), handle)
}
