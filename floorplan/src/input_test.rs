use super::*;

// =============================================================
// Modifiers
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
}

#[test]
fn modifiers_holds_matches_key() {
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
    assert!(ctrl.holds(PanModifier::Ctrl));
    assert!(!ctrl.holds(PanModifier::Alt));

    let meta = Modifiers { meta: true, ..Modifiers::default() };
    assert!(meta.holds(PanModifier::Meta));
    assert!(!Modifiers::default().holds(PanModifier::Shift));
}

#[test]
fn modifiers_deserialize_partial() {
    let m: Modifiers = serde_json::from_str(r#"{ "alt": true }"#).unwrap();
    assert!(m.alt);
    assert!(!m.ctrl);
}

// =============================================================
// Button / PanDirection / Cursor
// =============================================================

#[test]
fn button_default_is_primary() {
    assert_eq!(Button::default(), Button::Primary);
    let b: Button = serde_json::from_str(r#""secondary""#).unwrap();
    assert_eq!(b, Button::Secondary);
}

#[test]
fn pan_direction_offsets() {
    assert_eq!(PanDirection::Up.offset(20.0), (0.0, 20.0));
    assert_eq!(PanDirection::Down.offset(20.0), (0.0, -20.0));
    assert_eq!(PanDirection::Left.offset(20.0), (20.0, 0.0));
    assert_eq!(PanDirection::Right.offset(20.0), (-20.0, 0.0));
}

#[test]
fn cursor_for_corner_is_diagonal() {
    assert_eq!(Cursor::for_corner(Corner::Nw), Cursor::ResizeNwSe);
    assert_eq!(Cursor::for_corner(Corner::Se), Cursor::ResizeNwSe);
    assert_eq!(Cursor::for_corner(Corner::Ne), Cursor::ResizeNeSw);
    assert_eq!(Cursor::for_corner(Corner::Sw), Cursor::ResizeNeSw);
    assert_eq!(Cursor::default(), Cursor::Default);
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert!(matches!(state, InputState::Idle));
    assert_eq!(state.mode(), InteractionMode::Idle);
    assert_eq!(state.target(), None);
}

#[test]
fn input_state_modes_and_targets() {
    let id = uuid::Uuid::new_v4();
    let panning = InputState::Panning { start_screen: Point::ORIGIN, start_affine: Affine::IDENTITY };
    assert_eq!(panning.mode(), InteractionMode::Panning);
    assert_eq!(panning.target(), None);

    let moving = InputState::Moving { id, last_world: Point::ORIGIN };
    assert_eq!(moving.mode(), InteractionMode::Moving);
    assert_eq!(moving.target(), Some(id));

    let resizing = InputState::Resizing {
        id,
        corner: Corner::Se,
        anchor: Point::ORIGIN,
        anchor_local: Point::ORIGIN,
        snapshot: Pose::default(),
    };
    assert_eq!(resizing.mode(), InteractionMode::Resizing);
    assert_eq!(resizing.target(), Some(id));

    let rotating = InputState::Rotating { id, center: Point::ORIGIN, start_angle: 0.0, snapshot: Pose::default() };
    assert_eq!(rotating.mode(), InteractionMode::Rotating);
    assert_eq!(rotating.target(), Some(id));
}
