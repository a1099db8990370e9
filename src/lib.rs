#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod document;
pub mod error;
pub mod event;
pub mod history;
pub mod snapshot;
pub mod state;

pub use config::EditorConfig;
pub use document::{
    CurveHandle, Document, EditMode, EditState, Layer, ObjectPatch, ObjectType, PathPoint, Position,
    PositionPatch, Shape, SvgObject,
};
pub use error::{EditError, EditResult, ModelError, SnapshotError, SnapshotResult};
pub use event::{EditorEvent, EventBus, EventHandler};
pub use history::History;
pub use state::EditorContext;
