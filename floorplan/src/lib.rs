//! Interactive 2D transform engine for the room-layout floor plan.
//!
//! This crate owns everything between raw pointer input and item poses: the
//! world/screen view transform, hit-testing against posed furniture
//! footprints, selection handles, and the move/resize/rotate gesture state
//! machine. It has no drawing or windowing dependencies. The host feeds it
//! pointer events and receives [`engine::Action`]s (and optional observer
//! callbacks) describing what changed.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`]: the interaction controller and its public surface |
//! | [`doc`] | Items, poses, footprints, the room and the [`doc::SceneModel`] |
//! | [`camera`] | kurbo geometry re-exports, the inverse guard and the [`camera::ViewTransform`] |
//! | [`input`] | Pointer/modifier types and the gesture state machine states |
//! | [`hit`] | Selection handle geometry and scene hit-testing |
//! | [`render`] | Screen-space display list for host renderers |
//! | [`config`] | Tunable limits ([`config::CanvasConfig`]) |
//! | [`error`] | Error types |
//! | [`consts`] | Shared numeric constants (zoom limits, handle sizes, epsilons) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod hit;
pub mod input;
pub mod render;
