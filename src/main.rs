mod config;
mod error;
mod preview;
mod script;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use floorplan::doc::Room;
use floorplan::engine::EngineCore;

use crate::config::HostConfig;
use crate::error::HostError;
use crate::preview::{MirroredItem, spawn_preview};
use crate::script::{ReplayReport, Script};

/// Final state printed to stdout as JSON.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    steps: usize,
    actions: usize,
    pose_changes: usize,
    selections: usize,
    view_changes: usize,
    view_scale: f64,
    room: Room,
    preview_updates: usize,
    selected: Option<Uuid>,
    items: Vec<&'a MirroredItem>,
}

#[tokio::main]
async fn main() -> Result<(), HostError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = HostConfig::from_env()?;
    let script = match &config.gesture_script {
        Some(path) => {
            info!(path = %path.display(), "loading gesture script");
            Script::load(path).await?
        }
        None => {
            info!("GESTURE_SCRIPT not set; running built-in demo");
            Script::demo()
        }
    };

    let (observer, preview) = spawn_preview();
    let mut engine = EngineCore::new(config.canvas.clone(), config.room);
    engine.set_observer(Box::new(observer));

    info!(
        width_m = config.room.width_m,
        depth_m = config.room.depth_m,
        steps = script.steps.len(),
        items = script.items.len(),
        "replaying"
    );
    let report = script::replay(&mut engine, &script, config.viewport)?;

    // Dropping the observer closes the channel and lets the preview finish.
    engine.clear_observer();
    let mirror = preview.await?;

    let ReplayReport { steps, actions, pose_changes, selections, view_changes } = report;
    let mut items: Vec<&MirroredItem> = mirror.items().values().collect();
    items.sort_by(|a, b| a.category.cmp(&b.category));
    let summary = Summary {
        steps,
        actions,
        pose_changes,
        selections,
        view_changes,
        view_scale: engine.camera.scale(),
        room: mirror.room().unwrap_or(config.room),
        preview_updates: mirror.updates(),
        selected: mirror.selected(),
        items,
    };
    info!(steps, pose_changes, preview_updates = summary.preview_updates, "replay complete");
    let json = serde_json::to_string_pretty(&summary).map_err(HostError::Summary)?;
    println!("{json}");
    Ok(())
}
