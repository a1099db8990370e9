//! The editor's state machine: owner of the current document.
//!
//! `EditorContext` holds the authoritative [`Document`], derives a new document for every
//! gesture operation, and coordinates the history and the event bus.
//!
//! # Operation contract
//!
//! - Every operation builds the next document from a copy of the current one. The value
//!   previously handed out through [`EditorContext::get_image`] or an event is never touched.
//! - An operation that refers to a missing layer or object, or that continues a gesture
//!   that was never started, is a silent no-op: the document stays the same `Arc`, no event
//!   is emitted and nothing is recorded.
//! - Only completed gestures are recorded to the history; intermediate drag frames and
//!   mode switches are emitted but not recorded.
//!
//! # Example
//!
//! ```rust
//! use svg_state_machine::{EditorConfig, EditorContext, Document};
//! use egui::pos2;
//!
//! let mut editor = EditorContext::new(Document::default(), EditorConfig::default());
//! editor.switch_to_add_rect_edit_mode();
//! editor.start_add_rect(pos2(10.0, 10.0));
//! editor.continue_add_rect(pos2(30.0, 20.0));
//! editor.finish_add_rect(pos2(40.0, 30.0));
//!
//! let rect = editor.get_object_by_id("rect0").unwrap();
//! assert_eq!(rect.position.width, 30.0);
//! ```
use std::sync::Arc;

use log::{debug, info, trace};

use crate::config::EditorConfig;
use crate::document::{Document, EditState, SvgObject};
use crate::error::EditResult;
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::history::History;

/// Whether a successful operation produces an undo snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Change {
    /// Intermediate frame or mode switch
    Transient,
    /// Completed gesture
    Undoable,
}

/// The main context of the editor.
#[derive(Debug)]
pub struct EditorContext {
    /// The latest document, committed or mid-gesture
    document: Arc<Document>,
    config: EditorConfig,
    history: History,
    /// The event bus for broadcasting document changes
    event_bus: EventBus,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(Document::default(), EditorConfig::default())
    }
}

impl EditorContext {
    /// Creates a context around `document` and records it as the first history entry.
    pub fn new(document: Document, config: EditorConfig) -> Self {
        let document = Arc::new(document);
        let mut history = History::new(config.history_limit);
        history.record(Arc::clone(&document));

        Self {
            document,
            config,
            history,
            event_bus: EventBus::new(),
        }
    }

    /// Replaces the document and starts a fresh history with it. Subscribers are kept
    /// and notified.
    pub fn reset(&mut self, document: Document) {
        info!(
            "Resetting editor: {} layers, {} objects",
            document.layers.len(),
            document.objects.len()
        );
        self.document = Arc::new(document);
        self.history.clear();
        self.history.record(Arc::clone(&self.document));
        self.event_bus.emit(&EditorEvent::SnapshotRestored {
            document: Arc::clone(&self.document),
        });
    }

    /// Subscribe a handler to every document change
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    /// The current document
    pub fn get_image(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    /// Borrow the current document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The selected object of the current document
    pub fn get_selected_object(&self) -> Option<&SvgObject> {
        self.document.selected_object()
    }

    pub fn get_object_by_id(&self, id: &str) -> Option<&SvgObject> {
        self.document.object(id)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Installs a stored snapshot verbatim and notifies subscribers. Nothing is recorded.
    pub fn set_history_snapshot(&mut self, document: Arc<Document>) {
        debug!("Installing history snapshot ({:?})", document.edit_mode());
        self.document = document;
        self.event_bus.emit(&EditorEvent::SnapshotRestored {
            document: Arc::clone(&self.document),
        });
    }

    /// Go back to the previous committed snapshot. Returns false if there is none.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(document) => {
                self.set_history_snapshot(document);
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone snapshot. Returns false if there is none.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(document) => {
                self.set_history_snapshot(document);
                true
            }
            None => false,
        }
    }

    /// Runs `edit` on a copy of the current document and publishes the result.
    ///
    /// Errors and edits that leave the document equal to the current one are dropped.
    pub(crate) fn apply<F>(&mut self, operation: &'static str, edit: F)
    where
        F: FnOnce(&mut Document, &EditorConfig) -> EditResult<Change>,
    {
        let mut next = Document::clone(&self.document);
        let change = match edit(&mut next, &self.config) {
            Ok(change) => change,
            Err(err) => {
                trace!("{} ignored: {}", operation, err);
                return;
            }
        };
        if next == *self.document {
            trace!("{} left the document unchanged", operation);
            return;
        }

        self.document = Arc::new(next);
        let recorded = change == Change::Undoable;
        if recorded {
            debug!("{} committed ({:?})", operation, self.document.edit_mode());
            self.history.record(Arc::clone(&self.document));
        } else {
            trace!("{} -> {:?}", operation, self.document.edit_mode());
        }

        self.event_bus.emit(&EditorEvent::DocumentChanged {
            operation,
            document: Arc::clone(&self.document),
            recorded,
        });
    }

    /// Enters a resting mode, dropping any edit buffer and the object selection.
    pub(crate) fn switch_mode(&mut self, operation: &'static str, state: EditState) {
        debug_assert!(state.is_resting());
        self.apply(operation, move |document, _| {
            document.edit_state = state;
            document.selected_object_id = None;
            Ok(Change::Transient)
        });
    }
}
