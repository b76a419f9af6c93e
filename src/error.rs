//! Host-level failures. Anything here aborts the run with a message; the
//! engine itself never produces a fatal error during interaction.

use floorplan::error::{ConfigError, FootprintError, TransformError};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("invalid canvas config: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to read gesture script {path}: {source}")]
    ScriptRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse gesture script: {0}")]
    ScriptParse(#[from] serde_json::Error),

    #[error("invalid item footprint: {0}")]
    Footprint(#[from] FootprintError),

    #[error("view transform: {0}")]
    Transform(#[from] TransformError),

    #[error("failed to encode summary: {0}")]
    Summary(#[source] serde_json::Error),

    #[error("preview task failed: {0}")]
    Preview(#[from] tokio::task::JoinError),
}
