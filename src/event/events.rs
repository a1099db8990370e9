use std::sync::Arc;

use crate::document::{Document, EditMode};

/// Notifications pushed to render and history subscribers.
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// An operation produced a new document
    DocumentChanged {
        /// Name of the operation, e.g. `"finish_add_rect"`
        operation: &'static str,
        document: Arc<Document>,
        /// The new document was recorded as an undo snapshot
        recorded: bool,
    },
    /// A history snapshot replaced the document wholesale
    SnapshotRestored { document: Arc<Document> },
}

impl EditorEvent {
    /// The document carried by the event
    pub fn document(&self) -> &Arc<Document> {
        match self {
            Self::DocumentChanged { document, .. } | Self::SnapshotRestored { document } => document,
        }
    }

    pub fn edit_mode(&self) -> EditMode {
        self.document().edit_mode()
    }
}
