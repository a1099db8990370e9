use thiserror::Error;

use crate::document::ObjectType;

/// Reasons an editing operation was refused.
///
/// None of these ever reach the caller of an [`EditorContext`](crate::EditorContext) operation:
/// the editor turns every `Err` into a silent no-op (document untouched, no event, no
/// history entry). They exist so operations can be written with `?` and so the reason
/// shows up in trace logs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("no layer named {0:?}")]
    LayerNotFound(String),

    #[error("no layer is selected")]
    NoSelectedLayer,

    #[error("no object with id {0:?}")]
    ObjectNotFound(String),

    #[error("no object is selected")]
    NoSelectedObject,

    #[error("object {id:?} does not belong to layer {layer:?}")]
    ObjectNotInLayer { id: String, layer: String },

    #[error("object {0:?} is not a polygon")]
    NotAPolygon(String),

    #[error("polygon {id:?} has no point {index}")]
    PointOutOfRange { id: String, index: usize },

    #[error("point {index} of polygon {id:?} is not a curve")]
    NotACurve { id: String, index: usize },

    #[error("point {index} of polygon {id:?} is already a curve")]
    AlreadyCurve { id: String, index: usize },

    #[error("closing curve of polygon {id:?} is already prepared")]
    CurveAlreadyPrepared { id: String },

    #[error("{operation} called without a gesture in progress")]
    MissingEditBuffer { operation: &'static str },

    #[error("attributes do not apply to {kind} object {id:?}")]
    AttributeMismatch { id: String, kind: ObjectType },

    #[error("layer is already at the boundary")]
    AtBoundary,

    #[error("layer {0:?} is not a mask")]
    NotAMask(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type for editing operations
pub type EditResult<T> = Result<T, EditError>;

/// Structural problems found in a document value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("layer {layer:?} references missing object {id:?}")]
    DanglingObjectId { layer: String, id: String },

    #[error("duplicate layer name {0:?}")]
    DuplicateLayerName(String),

    #[error("duplicate object id {0:?}")]
    DuplicateObjectId(String),

    #[error("{0} layers are selected")]
    MultipleSelectedLayers(usize),

    #[error("{0} layers are pre-selected")]
    MultiplePreSelectedLayers(usize),

    #[error("selected object {0:?} is not in the selected layer")]
    SelectionOutsideLayer(String),

    #[error("polygon {id:?} has {count} points, at least 2 are required")]
    PolygonTooShort { id: String, count: usize },

    #[error("polygon {0:?} does not start with a move-to")]
    PolygonMissingMoveTo(String),

    #[error("polygon {id:?} has a move-to at index {index}")]
    MisplacedMoveTo { id: String, index: usize },
}

/// Errors raised while encoding or decoding document snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to (de)serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] ModelError),
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;
