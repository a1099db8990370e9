use std::sync::Arc;

use crate::document::Document;

/// Undo/redo storage of committed document snapshots.
///
/// The top of the undo stack is always the snapshot matching the current document, so
/// undoing pops it onto the redo stack and hands back the one below.
#[derive(Debug, Clone)]
pub struct History {
    /// Snapshots that can be returned to, oldest first
    undo_stack: Vec<Arc<Document>>,
    /// Snapshots that were undone, most recently undone last
    redo_stack: Vec<Arc<Document>>,
    /// Maximum length of the undo stack, 0 for unlimited
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(0)
    }
}

impl History {
    /// Creates a new empty history keeping at most `limit` snapshots (0 = unlimited)
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit,
        }
    }

    /// Store a committed snapshot. Anything that was undone is forgotten.
    pub fn record(&mut self, document: Arc<Document>) {
        self.undo_stack.push(document);
        self.redo_stack.clear();

        if self.limit > 0 && self.undo_stack.len() > self.limit {
            let excess = self.undo_stack.len() - self.limit;
            self.undo_stack.drain(..excess);
        }
    }

    /// Step back, returning the snapshot to install
    pub fn undo(&mut self) -> Option<Arc<Document>> {
        if !self.can_undo() {
            return None;
        }
        let current = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        self.undo_stack.last().cloned()
    }

    /// Step forward again, returning the snapshot to install
    pub fn redo(&mut self) -> Option<Arc<Document>> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(Arc::clone(&next));
        Some(next)
    }

    /// Returns true if there is an older snapshot to go back to
    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    /// Returns true if there are undone snapshots
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of stored snapshots, including the current one
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// The most recently recorded snapshot
    pub fn latest(&self) -> Option<&Arc<Document>> {
        self.undo_stack.last()
    }

    /// Clear the history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
