//! Screen-space display list.
//!
//! Hosts draw these primitives in order with whatever API they have; handle
//! placement and sizing is decided here so no renderer re-derives it.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::camera::{Point, ViewTransform, rect_corners};
use crate::config::CanvasConfig;
use crate::doc::{ItemId, Rgba, SceneModel};
use crate::hit::{Corner, HandleGeometry};

/// One drawable shape, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Primitive {
    /// Room outline, corners in TL, TR, BR, BL order.
    Room { corners: [Point; 4] },
    /// Posed footprint of an item.
    Item { id: ItemId, outline: Vec<Point>, color: Rgba, selected: bool },
    /// World bounds of the selected item.
    SelectionBounds { corners: [Point; 4] },
    /// Square resize handle; `size` is the side length in pixels.
    CornerHandle { corner: Corner, center: Point, size: f64 },
    /// Line from the top-right corner to the rotate handle.
    RotateConnector { from: Point, to: Point },
    RotateHandle { center: Point, radius: f64 },
}

/// Build the display list: room, items bottom to top, then the selection
/// overlay.
#[must_use]
pub fn display_list(scene: &SceneModel, camera: &ViewTransform, config: &CanvasConfig) -> Vec<Primitive> {
    let to_screen = |p: Point| camera.to_screen(p);
    let mut out = Vec::with_capacity(scene.len() + 8);

    out.push(Primitive::Room { corners: rect_corners(scene.room_bounds()).map(to_screen) });

    let selected_id = scene.selected_id();
    for item in scene.items() {
        out.push(Primitive::Item {
            id: item.id(),
            outline: item.world_footprint().into_iter().map(to_screen).collect(),
            color: item.color(),
            selected: selected_id == Some(item.id()),
        });
    }

    if let Some(item) = scene.selected() {
        let handles = HandleGeometry::for_bounds(item.world_bounds(), camera, config);
        let bounds = handles.bounds();
        out.push(Primitive::SelectionBounds { corners: rect_corners(bounds).map(to_screen) });
        for corner in Corner::ALL {
            out.push(Primitive::CornerHandle {
                corner,
                center: to_screen(handles.corner_center(corner)),
                size: config.handle_size_px,
            });
        }
        let rotate_center = to_screen(handles.rotate_center());
        out.push(Primitive::RotateConnector { from: to_screen(Corner::Ne.of(&bounds)), to: rotate_center });
        out.push(Primitive::RotateHandle { center: rotate_center, radius: config.handle_size_px * 0.5 });
    }

    out
}
