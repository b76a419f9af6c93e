//! Input model: modifier keys, pointer buttons, cursors, and the gesture state
//! machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. Each variant carries the snapshot taken at pointer-down so that
//! every pointer-move can be computed from gesture start rather than
//! accumulated frame to frame.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Affine, Point};
use crate::config::PanModifier;
use crate::doc::{ItemId, Pose};
use crate::hit::Corner;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether the given pan modifier key is down.
    #[must_use]
    pub fn holds(self, key: PanModifier) -> bool {
        match key {
            PanModifier::Ctrl => self.ctrl,
            PanModifier::Alt => self.alt,
            PanModifier::Meta => self.meta,
            PanModifier::Shift => self.shift,
        }
    }
}

/// Pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll, in notches.
    pub dx: f64,
    /// Vertical scroll, in notches (positive = down, zooms out).
    pub dy: f64,
}

/// Direction of a single D-pad pan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    /// Screen-space offset of one step of `step` pixels. Moving the view
    /// "up" shows content further up, so the content shifts down.
    #[must_use]
    pub fn offset(self, step: f64) -> (f64, f64) {
        match self {
            Self::Up => (0.0, step),
            Self::Down => (0.0, -step),
            Self::Left => (step, 0.0),
            Self::Right => (-step, 0.0),
        }
    }
}

/// Pointer cursor the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cursor {
    #[default]
    Default,
    Move,
    Grab,
    ResizeNwSe,
    ResizeNeSw,
}

impl Cursor {
    /// Diagonal resize cursor for dragging `corner`.
    #[must_use]
    pub fn for_corner(corner: Corner) -> Self {
        match corner {
            Corner::Nw | Corner::Se => Self::ResizeNwSe,
            Corner::Ne | Corner::Sw => Self::ResizeNeSw,
        }
    }
}

/// Coarse gesture mode, for hosts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
    Moving,
    Resizing,
    Rotating,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the view.
    Panning {
        /// Screen position at pointer-down.
        start_screen: Point,
        /// View matrix at pointer-down; each frame re-derives from it.
        start_affine: Affine,
    },
    /// Moving an item.
    Moving {
        id: ItemId,
        /// World position of the previous pointer event.
        last_world: Point,
    },
    /// Resizing an item from one corner.
    Resizing {
        id: ItemId,
        corner: Corner,
        /// World position of the opposite bounds corner at pointer-down.
        anchor: Point,
        /// `anchor` expressed in the item's local frame at pointer-down.
        anchor_local: Point,
        /// Pose at pointer-down.
        snapshot: Pose,
    },
    /// Rotating an item about its bounds center.
    Rotating {
        id: ItemId,
        /// World bounds center at pointer-down; the pivot.
        center: Point,
        /// Pointer angle about `center` at pointer-down.
        start_angle: f64,
        /// Pose at pointer-down.
        snapshot: Pose,
    },
}

impl InputState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self {
            Self::Idle => InteractionMode::Idle,
            Self::Panning { .. } => InteractionMode::Panning,
            Self::Moving { .. } => InteractionMode::Moving,
            Self::Resizing { .. } => InteractionMode::Resizing,
            Self::Rotating { .. } => InteractionMode::Rotating,
        }
    }

    /// Item the active gesture is editing, if any.
    #[must_use]
    pub fn target(&self) -> Option<ItemId> {
        match self {
            Self::Moving { id, .. } | Self::Resizing { id, .. } | Self::Rotating { id, .. } => Some(*id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }
}
