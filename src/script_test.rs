#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use floorplan::config::CanvasConfig;
use floorplan::doc::Room;

use super::*;

const EPSILON: f64 = 1e-6;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn viewport() -> Size {
    Size::new(800.0, 600.0)
}

fn find<'a>(engine: &'a EngineCore, category: &str) -> &'a Item {
    engine.items().iter().find(|i| i.identity().category == category).unwrap()
}

#[test]
fn parse_full_script() {
    let script = Script::parse(
        r#"{
            "items": [
                { "source_id": "sofa.obj", "category": "sofa", "width": 100, "depth": 45, "x": 80, "y": 60 },
                { "source_id": "rug.obj", "category": "rug", "width": 30, "depth": 30,
                  "outline": [{ "x": -15, "y": -15 }, { "x": 15, "y": -15 }, { "x": 0, "y": 15 }],
                  "color": { "r": 200, "g": 10, "b": 10, "a": 255 } }
            ],
            "steps": [
                { "op": "down", "x": 80, "y": 60, "button": "secondary", "modifiers": { "ctrl": true } },
                { "op": "move", "x": 90, "y": 60 },
                { "op": "up", "x": 90, "y": 60 },
                { "op": "wheel", "notches": 1.5 },
                { "op": "zoom", "factor": 2 },
                { "op": "pan", "dx": -5, "dy": 5 },
                { "op": "center" }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(script.items.len(), 2);
    assert_eq!(script.steps.len(), 7);
    assert_eq!(
        script.steps[0],
        Step::Down {
            x: 80.0,
            y: 60.0,
            button: Button::Secondary,
            modifiers: Modifiers { ctrl: true, ..Modifiers::default() }
        }
    );
    assert_eq!(script.steps[6], Step::Center);
    assert!(script.items[1].outline.is_some());
}

#[test]
fn items_are_optional() {
    let script = Script::parse(r#"{ "steps": [{ "op": "center" }] }"#).unwrap();
    assert!(script.items.is_empty());
}

#[test]
fn unknown_op_is_a_parse_error() {
    let err = Script::parse(r#"{ "steps": [{ "op": "teleport" }] }"#).unwrap_err();
    assert!(matches!(err, HostError::ScriptParse(_)));
}

#[test]
fn item_spec_builds_polygon_and_color() {
    let spec = ItemSpec {
        source_id: "rug.obj".into(),
        category: "rug".into(),
        width: 30.0,
        depth: 20.0,
        outline: Some(vec![Point::new(-15.0, -10.0), Point::new(15.0, -10.0), Point::new(0.0, 10.0)]),
        x: Some(5.0),
        y: Some(6.0),
        color: Some(Rgba::rgb(1, 2, 3)),
    };
    let item = spec.build().unwrap();
    assert_eq!(item.footprint().vertices().len(), 3);
    assert_eq!(item.color(), Rgba::rgb(1, 2, 3));
    assert_eq!((item.pose().tx(), item.pose().ty()), (5.0, 6.0));
    assert_eq!(item.base_largest_dimension(), 30.0);
}

#[test]
fn item_spec_rejects_bad_outline() {
    let spec = ItemSpec {
        source_id: "bad.obj".into(),
        category: "bad".into(),
        width: 1.0,
        depth: 1.0,
        outline: Some(vec![Point::ORIGIN]),
        x: None,
        y: None,
        color: None,
    };
    assert!(matches!(spec.build(), Err(HostError::Footprint(_))));
}

#[test]
fn unpositioned_items_land_at_view_center() {
    let script = Script::parse(
        r#"{ "items": [{ "source_id": "chair.obj", "category": "chair", "width": 20, "depth": 20 }], "steps": [] }"#,
    )
    .unwrap();
    let mut engine = EngineCore::default();
    replay(&mut engine, &script, viewport()).unwrap();
    let pose = find(&engine, "chair").pose();
    assert!(approx_eq(pose.tx(), 125.0));
    assert!(approx_eq(pose.ty(), 100.0));
}

#[test]
fn demo_replays_every_step() {
    let mut engine = EngineCore::default();
    let script = Script::demo();
    let report = replay(&mut engine, &script, viewport()).unwrap();
    assert_eq!(report.steps, script.steps.len());
    assert_eq!(report.selections, 2);

    // Sofa moved by (20, 10) then stretched from its bottom-right corner.
    let sofa = find(&engine, "sofa");
    let bounds = sofa.world_bounds();
    assert!(approx_eq(bounds.x0, 50.0));
    assert!(approx_eq(bounds.y0, 47.5));
    assert!(approx_eq(bounds.x1, 170.0));
    assert!(approx_eq(bounds.y1, 100.0));

    // Table turned a quarter in place.
    let table = find(&engine, "table").pose();
    assert!(approx_eq(table.rotation(), FRAC_PI_2));
    assert_eq!((table.tx(), table.ty()), (170.0, 130.0));

    // Table stays selected; the final step re-centers the room.
    assert_eq!(engine.selection().map(|i| i.identity().category.clone()), Some("table".to_string()));
    assert!(approx_eq(engine.camera.scale(), 2.7));
}

#[test]
fn body_and_corner_gestures_ignore_viewport() {
    for size in [Size::new(1920.0, 1080.0), Size::new(320.0, 480.0)] {
        let mut engine = EngineCore::new(CanvasConfig::default(), Room::default());
        replay(&mut engine, &Script::demo(), size).unwrap();
        let bounds = find(&engine, "sofa").world_bounds();
        assert!(approx_eq(bounds.x0, 50.0), "viewport {size:?}");
        assert!(approx_eq(bounds.x1, 170.0), "viewport {size:?}");
        assert!(approx_eq(bounds.y1, 100.0), "viewport {size:?}");
    }
}

#[test]
fn replay_reports_empty_viewport() {
    let mut engine = EngineCore::default();
    let err = replay(&mut engine, &Script::demo(), Size::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, HostError::Transform(_)));
}
