//! Dragging the selected object.
use egui::Pos2;

use super::context::{Change, EditorContext};
use crate::document::EditState;
use crate::error::EditError;

impl EditorContext {
    /// Pick up the selected object at `screen`.
    pub fn start_selected_object_move(&mut self, screen: Pos2) {
        self.apply("start_selected_object_move", |document, _| {
            let object = document
                .selected_object()
                .cloned()
                .ok_or(EditError::NoSelectedObject)?;
            document.edit_state = EditState::SelectedObjectMove {
                object,
                last_screen_pos: screen,
            };
            Ok(Change::Transient)
        });
    }

    /// Move the picked-up object by the pointer delta since the last frame.
    ///
    /// The pool copy follows along so the object is drawn where the pointer is.
    pub fn continue_selected_object_move(&mut self, screen: Pos2) {
        self.apply("continue_selected_object_move", |document, _| {
            let EditState::SelectedObjectMove {
                object,
                last_screen_pos,
            } = &mut document.edit_state
            else {
                return Err(EditError::MissingEditBuffer {
                    operation: "continue_selected_object_move",
                });
            };
            object.position.translate(screen - *last_screen_pos);
            *last_screen_pos = screen;
            let moved = object.clone();

            document.replace_object(moved)?;
            Ok(Change::Transient)
        });
    }

    pub fn finish_selected_object_move(&mut self) {
        self.apply("finish_selected_object_move", |document, _| {
            let object = match &document.edit_state {
                EditState::SelectedObjectMove { object, .. } => object.clone(),
                _ => {
                    return Err(EditError::MissingEditBuffer {
                        operation: "finish_selected_object_move",
                    });
                }
            };
            document.replace_object(object)?;
            document.edit_state = EditState::SelectObj;
            Ok(Change::Undoable)
        });
    }
}
