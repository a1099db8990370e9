pub mod context;
mod layers;
mod object_move;
mod objects;
mod polygon_edit;
mod shapes;

pub use context::EditorContext;
