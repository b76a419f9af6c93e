#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{Footprint, Item, ItemIdentity};

fn geometry(bounds: Rect) -> HandleGeometry {
    HandleGeometry::for_bounds(bounds, &ViewTransform::default(), &CanvasConfig::default())
}

fn item(w: f64, d: f64) -> Item {
    Item::new(ItemIdentity::new("box.obj", "box"), Footprint::rect(w, d).unwrap(), w.max(d))
}

// =============================================================
// Corner
// =============================================================

#[test]
fn corner_opposites() {
    assert_eq!(Corner::Nw.opposite(), Corner::Se);
    assert_eq!(Corner::Ne.opposite(), Corner::Sw);
    assert_eq!(Corner::Se.opposite(), Corner::Nw);
    assert_eq!(Corner::Sw.opposite(), Corner::Ne);
}

#[test]
fn corner_of_rect() {
    let r = Rect::new(0.0, 0.0, 10.0, 4.0);
    assert_eq!(Corner::Nw.of(&r), Point::new(0.0, 0.0));
    assert_eq!(Corner::Ne.of(&r), Point::new(10.0, 0.0));
    assert_eq!(Corner::Se.of(&r), Point::new(10.0, 4.0));
    assert_eq!(Corner::Sw.of(&r), Point::new(0.0, 4.0));
}

#[test]
fn corner_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Corner::Se).unwrap(), "\"se\"");
    assert_eq!(serde_json::to_string(&Corner::ALL).unwrap(), r#"["nw","ne","se","sw"]"#);
}

// =============================================================
// HandleGeometry
// =============================================================

#[test]
fn handles_at_identity_zoom_are_eight_units() {
    let g = geometry(Rect::new(-50.0, -25.0, 50.0, 25.0));
    assert_eq!(g.handle_size(), 8.0);
    assert_eq!(g.corner_rect(Corner::Nw), Rect::new(-54.0, -29.0, -46.0, -21.0));
    assert_eq!(g.rotate_center(), Point::new(50.0, -45.0));
    assert_eq!(g.rotate_radius(), 4.0);
}

#[test]
fn handles_shrink_in_world_when_zoomed_in() {
    let mut camera = ViewTransform::default();
    assert!(camera.zoom_around_world_point(Point::ORIGIN, 2.0));
    let g = HandleGeometry::for_bounds(Rect::new(0.0, 0.0, 100.0, 50.0), &camera, &CanvasConfig::default());
    assert!((g.handle_size() - 4.0).abs() < 1e-9);
    assert!((g.rotate_center().y + 10.0).abs() < 1e-9);
}

#[test]
fn hit_corner_handles() {
    let g = geometry(Rect::new(-50.0, -25.0, 50.0, 25.0));
    assert_eq!(g.hit_test(Point::new(-50.0, -25.0)), Some(Handle::Resize(Corner::Nw)));
    assert_eq!(g.hit_test(Point::new(53.0, -22.0)), Some(Handle::Resize(Corner::Ne)));
    assert_eq!(g.hit_test(Point::new(50.0, 25.0)), Some(Handle::Resize(Corner::Se)));
    assert_eq!(g.hit_test(Point::new(-47.0, 28.0)), Some(Handle::Resize(Corner::Sw)));
}

#[test]
fn hit_includes_far_handle_edges() {
    let g = geometry(Rect::new(-50.0, -25.0, 50.0, 25.0));
    assert_eq!(g.hit_test(Point::new(54.0, 29.0)), Some(Handle::Resize(Corner::Se)));
    assert_eq!(g.hit_test(Point::new(54.1, 29.0)), None);
}

#[test]
fn hit_rotate_handle() {
    let g = geometry(Rect::new(-50.0, -25.0, 50.0, 25.0));
    assert_eq!(g.hit_test(Point::new(50.0, -45.0)), Some(Handle::Rotate));
    assert_eq!(g.hit_test(Point::new(52.0, -43.0)), Some(Handle::Rotate));
}

#[test]
fn hit_misses_body_and_outside() {
    let g = geometry(Rect::new(-50.0, -25.0, 50.0, 25.0));
    assert_eq!(g.hit_test(Point::ORIGIN), None);
    assert_eq!(g.hit_test(Point::new(60.0, 0.0)), None);
    assert_eq!(g.hit_test(Point::new(50.0, -35.0)), None);
}

#[test]
fn rotate_handle_wins_over_corner() {
    // Shallow bounds put the rotate handle on top of the top-right corner.
    let config = CanvasConfig { rotate_handle_offset_px: 2.0, ..CanvasConfig::default() };
    let g = HandleGeometry::for_bounds(Rect::new(0.0, 0.0, 100.0, 50.0), &ViewTransform::default(), &config);
    assert_eq!(g.hit_test(Point::new(100.0, -1.0)), Some(Handle::Rotate));
}

#[test]
fn overlapping_corners_resolve_in_fixed_order() {
    // A 4x4 box: every corner handle covers the center.
    let g = geometry(Rect::new(0.0, 0.0, 4.0, 4.0));
    assert_eq!(g.hit_test(Point::new(2.0, 2.0)), Some(Handle::Resize(Corner::Nw)));
}

#[test]
fn resize_anchor_is_opposite_corner() {
    let g = geometry(Rect::new(-50.0, -25.0, 50.0, 25.0));
    assert_eq!(g.resize_anchor(Corner::Se), Point::new(-50.0, -25.0));
    assert_eq!(g.resize_anchor(Corner::Nw), Point::new(50.0, 25.0));
    assert_eq!(g.resize_anchor(Corner::Ne), Point::new(-50.0, 25.0));
    assert_eq!(g.resize_anchor(Corner::Sw), Point::new(50.0, -25.0));
}

// =============================================================
// Scene hit_test
// =============================================================

#[test]
fn scene_hit_body() {
    let mut scene = SceneModel::default();
    let a = item(100.0, 50.0);
    scene.push(a.clone());
    let hit = hit_test(Point::new(10.0, 10.0), &scene, &ViewTransform::default(), &CanvasConfig::default());
    assert_eq!(hit, Some(Hit { item_id: a.id(), part: HitPart::Body }));
}

#[test]
fn scene_handles_only_for_selection() {
    let mut scene = SceneModel::default();
    let a = item(100.0, 50.0);
    scene.push(a.clone());
    let camera = ViewTransform::default();
    let config = CanvasConfig::default();

    // Just outside the corner: nothing until the item is selected.
    let outside = Point::new(52.0, 27.0);
    assert_eq!(hit_test(outside, &scene, &camera, &config), None);

    scene.select(a.id());
    assert_eq!(
        hit_test(outside, &scene, &camera, &config),
        Some(Hit { item_id: a.id(), part: HitPart::Handle(Handle::Resize(Corner::Se)) })
    );
}

#[test]
fn scene_selected_handles_beat_items_on_top() {
    let mut scene = SceneModel::default();
    let under = item(100.0, 50.0);
    let over = item(200.0, 200.0);
    scene.push(under.clone());
    scene.push(over.clone());
    scene.select(under.id());
    let hit = hit_test(Point::new(50.0, 25.0), &scene, &ViewTransform::default(), &CanvasConfig::default());
    assert_eq!(hit.map(|h| h.item_id), Some(under.id()));
    assert_eq!(hit.map(|h| h.part), Some(HitPart::Handle(Handle::Resize(Corner::Se))));
}

#[test]
fn scene_miss() {
    let scene = SceneModel::default();
    assert_eq!(hit_test(Point::ORIGIN, &scene, &ViewTransform::default(), &CanvasConfig::default()), None);
}
