//! Gesture scripts: a JSON list of items and input steps replayed against an
//! [`EngineCore`].
//!
//! Pointer coordinates in a script are world units. The replayer maps them
//! through the engine's current view before dispatching, so a script keeps
//! hitting the same furniture whatever the viewport or zoom.
//!
//! ```json
//! {
//!   "items": [{ "source_id": "sofa.obj", "category": "sofa", "width": 100, "depth": 45, "x": 80, "y": 60 }],
//!   "steps": [
//!     { "op": "down", "x": 80, "y": 60 },
//!     { "op": "move", "x": 100, "y": 70 },
//!     { "op": "up", "x": 100, "y": 70 },
//!     { "op": "wheel", "notches": -2 },
//!     { "op": "center" }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::path::Path;

use floorplan::camera::{Point, Size};
use floorplan::doc::{Footprint, Item, ItemIdentity, Rgba};
use floorplan::engine::{Action, EngineCore};
use floorplan::input::{Button, Modifiers, WheelDelta};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::error::HostError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub items: Vec<ItemSpec>,
    pub steps: Vec<Step>,
}

/// Furniture to place before the steps run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemSpec {
    pub source_id: String,
    pub category: String,
    /// Footprint width in world units.
    pub width: f64,
    /// Footprint depth in world units.
    pub depth: f64,
    /// Custom outline in the local frame; a `width × depth` rectangle if absent.
    #[serde(default)]
    pub outline: Option<Vec<Point>>,
    /// World position; the view center if absent.
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub color: Option<Rgba>,
}

impl ItemSpec {
    /// Build the item at the unit pose (or at `x`, `y` when both are set).
    pub fn build(&self) -> Result<Item, HostError> {
        let footprint = match &self.outline {
            Some(outline) => Footprint::polygon(outline.clone())?,
            None => Footprint::rect(self.width, self.depth)?,
        };
        let identity = ItemIdentity::new(self.source_id.clone(), self.category.clone());
        let mut item = Item::new(identity, footprint, self.width.max(self.depth));
        if let Some(color) = self.color {
            item = item.with_color(color);
        }
        if let (Some(x), Some(y)) = (self.x, self.y) {
            item = item.translate_to(x, y);
        }
        Ok(item)
    }

    fn positioned(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}

/// One input step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    Wheel {
        notches: f64,
    },
    Zoom {
        factor: f64,
    },
    Pan {
        dx: f64,
        dy: f64,
    },
    Center,
}

/// Counts gathered while replaying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: usize,
    pub actions: usize,
    pub pose_changes: usize,
    pub selections: usize,
    pub view_changes: usize,
}

impl ReplayReport {
    fn record(&mut self, actions: &[Action]) {
        self.actions += actions.len();
        for action in actions {
            match action {
                Action::ItemPoseChanged(_) => self.pose_changes += 1,
                Action::ItemSelected(_) => self.selections += 1,
                Action::ViewChanged => self.view_changes += 1,
                _ => {}
            }
        }
    }
}

impl Script {
    /// Read and parse a script file.
    pub async fn load(path: &Path) -> Result<Self, HostError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| HostError::ScriptRead { path: path.display().to_string(), source })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, HostError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Built-in walkthrough: move and resize a sofa, select and rotate a
    /// table, then zoom, pan and re-center.
    #[must_use]
    pub fn demo() -> Self {
        let rect = |source_id: &str, category: &str, width: f64, depth: f64, x: f64, y: f64| ItemSpec {
            source_id: source_id.to_string(),
            category: category.to_string(),
            width,
            depth,
            outline: None,
            x: Some(x),
            y: Some(y),
            color: None,
        };
        let down = |x: f64, y: f64| Step::Down { x, y, button: Button::Primary, modifiers: Modifiers::default() };
        let drag = |x: f64, y: f64| Step::Move { x, y, modifiers: Modifiers::default() };
        let up = |x: f64, y: f64| Step::Up { x, y, button: Button::Primary };

        Self {
            items: vec![rect("sofa.obj", "sofa", 100.0, 45.0, 80.0, 60.0), rect("table.obj", "table", 60.0, 60.0, 170.0, 130.0)],
            steps: vec![
                // Move the sofa by (20, 10).
                down(80.0, 60.0),
                drag(90.0, 65.0),
                drag(100.0, 70.0),
                up(100.0, 70.0),
                // Stretch it from the bottom-right corner.
                down(150.0, 92.5),
                drag(170.0, 100.0),
                up(170.0, 100.0),
                // Select the table and turn it a quarter.
                down(170.0, 130.0),
                up(170.0, 130.0),
                down(200.0, 92.6),
                drag(220.0, 180.0),
                drag(170.0, 180.0),
                up(170.0, 180.0),
                Step::Wheel { notches: -2.0 },
                Step::Pan { dx: 40.0, dy: 0.0 },
                Step::Zoom { factor: 0.8 },
                Step::Center,
            ],
        }
    }
}

/// Fit the room into `viewport`, place the script's items, then run every
/// step in order.
pub fn replay(engine: &mut EngineCore, script: &Script, viewport: Size) -> Result<ReplayReport, HostError> {
    let mut report = ReplayReport::default();
    report.record(&engine.center_on_room(viewport)?);

    for spec in &script.items {
        let item = spec.build()?;
        let actions =
            if spec.positioned() { engine.add_item(item) } else { engine.add_item_at_view_center(item) };
        report.record(&actions);
    }

    for step in &script.steps {
        let actions = apply(engine, step, viewport)?;
        trace!(?step, actions = actions.len(), "step replayed");
        report.record(&actions);
        report.steps += 1;
    }
    debug!(?report, "replay finished");
    Ok(report)
}

fn apply(engine: &mut EngineCore, step: &Step, viewport: Size) -> Result<Vec<Action>, HostError> {
    let screen = |engine: &EngineCore, x: f64, y: f64| engine.camera.to_screen(Point::new(x, y));
    let actions = match *step {
        Step::Down { x, y, button, modifiers } => {
            let at = screen(engine, x, y);
            engine.on_pointer_down(at, button, modifiers)
        }
        Step::Move { x, y, modifiers } => {
            let at = screen(engine, x, y);
            engine.on_pointer_move(at, modifiers)
        }
        Step::Up { x, y, button } => {
            let at = screen(engine, x, y);
            engine.on_pointer_up(at, button, Modifiers::default())
        }
        Step::Wheel { notches } => engine.on_wheel(WheelDelta { dx: 0.0, dy: notches }),
        Step::Zoom { factor } => engine.zoom_by(factor),
        Step::Pan { dx, dy } => engine.pan_by(dx, dy),
        Step::Center => engine.center_on_room(viewport)?,
    };
    Ok(actions)
}
