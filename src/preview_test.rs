use floorplan::camera::Point;
use floorplan::doc::{Footprint, ItemIdentity};
use floorplan::engine::EngineCore;
use floorplan::input::{Button, Modifiers};

use super::*;

fn item(category: &str) -> Item {
    Item::new(ItemIdentity::new(format!("{category}.obj"), category), Footprint::rect(40.0, 20.0).unwrap(), 40.0)
}

#[test]
fn mirror_tracks_selection_and_poses() {
    let mut mirror = PreviewMirror::default();
    let chair = item("chair");
    mirror.apply(PreviewUpdate::Selected(chair.clone()));
    assert_eq!(mirror.selected(), Some(chair.id()));

    let moved = chair.translate_to(12.0, 8.0);
    mirror.apply(PreviewUpdate::PoseChanged(moved.clone()));
    assert_eq!(mirror.items()[&chair.id()].pose, moved.pose());

    mirror.apply(PreviewUpdate::Deselected);
    assert_eq!(mirror.selected(), None);
    assert_eq!(mirror.updates(), 3);
    assert_eq!(mirror.tracked(), 1);
}

#[test]
fn mirror_tracks_color() {
    let mut mirror = PreviewMirror::default();
    let lamp = item("lamp").with_color(Rgba::rgb(10, 20, 30));
    mirror.apply(PreviewUpdate::ColorChanged(lamp.clone()));
    assert_eq!(mirror.items()[&lamp.id()].color, Rgba::rgb(10, 20, 30));
    assert_eq!(mirror.items()[&lamp.id()].category, "lamp");
}

#[tokio::test]
async fn preview_task_receives_engine_callbacks() {
    let (observer, handle) = spawn_preview();
    let mut engine = EngineCore::default();
    engine.set_observer(Box::new(observer));

    let sofa = item("sofa").translate_to(100.0, 100.0);
    let id = sofa.id();
    engine.add_item(sofa);
    engine.on_pointer_down(Point::new(100.0, 100.0), Button::Primary, Modifiers::default());
    engine.on_pointer_move(Point::new(110.0, 100.0), Modifiers::default());
    engine.on_pointer_up(Point::new(110.0, 100.0), Button::Primary, Modifiers::default());

    engine.clear_observer();
    let mirror = handle.await.unwrap();

    // added + selected + one pose change
    assert_eq!(mirror.updates(), 3);
    assert_eq!(mirror.selected(), Some(id));
    assert_eq!(mirror.items()[&id].pose.tx(), 110.0);
}

#[test]
fn mirror_follows_adds_and_removes() {
    let mut mirror = PreviewMirror::default();
    let sofa = item("sofa");
    let lamp = item("lamp");
    mirror.apply(PreviewUpdate::Added(sofa.clone()));
    mirror.apply(PreviewUpdate::Selected(sofa.clone()));
    mirror.apply(PreviewUpdate::Removed(sofa.id()));
    mirror.apply(PreviewUpdate::Added(lamp.clone()));

    assert_eq!(mirror.tracked(), 1);
    assert!(mirror.items().contains_key(&lamp.id()));
    assert!(!mirror.items().contains_key(&sofa.id()));
    assert_eq!(mirror.selected(), None);
}

#[test]
fn mirror_replace_resets_items_and_stale_selection() {
    let mut mirror = PreviewMirror::default();
    let desk = item("desk");
    let chair = item("chair");
    mirror.apply(PreviewUpdate::Selected(desk.clone()));
    mirror.apply(PreviewUpdate::Replaced(vec![chair.clone()]));
    assert_eq!(mirror.tracked(), 1);
    assert_eq!(mirror.items()[&chair.id()].category, "chair");
    assert_eq!(mirror.selected(), None);

    mirror.apply(PreviewUpdate::Selected(chair.clone()));
    mirror.apply(PreviewUpdate::Replaced(vec![chair.translate_to(5.0, 5.0), desk.clone()]));
    assert_eq!(mirror.selected(), Some(chair.id()));
    assert_eq!(mirror.items()[&chair.id()].pose.tx(), 5.0);
}

#[test]
fn mirror_records_room() {
    let mut mirror = PreviewMirror::default();
    assert_eq!(mirror.room(), None);
    mirror.apply(PreviewUpdate::RoomChanged(Room::new(3.0, 2.0, 40.0)));
    assert_eq!(mirror.room(), Some(Room::new(3.0, 2.0, 40.0)));
}

#[tokio::test]
async fn preview_task_tracks_scene_membership() {
    let (observer, handle) = spawn_preview();
    let mut engine = EngineCore::default();
    engine.set_observer(Box::new(observer));

    let sofa = item("sofa");
    let sofa_id = sofa.id();
    let lamp = item("lamp");
    let lamp_id = lamp.id();
    engine.add_item(sofa);
    engine.select(sofa_id);
    engine.remove_item(sofa_id);
    engine.add_item(lamp);
    engine.set_room_dimensions(6.0, 3.0, 50.0);

    engine.clear_observer();
    let mirror = handle.await.unwrap();

    assert_eq!(mirror.tracked(), 1);
    assert!(mirror.items().contains_key(&lamp_id));
    assert!(!mirror.items().contains_key(&sofa_id));
    assert_eq!(mirror.selected(), None);
    assert_eq!(mirror.room(), Some(Room::new(6.0, 3.0, 50.0)));
}

#[test]
fn observer_survives_closed_channel() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    let mut observer = ChannelObserver::new(tx);
    observer.item_deselected();
    observer.item_pose_changed(&item("desk"));
}
