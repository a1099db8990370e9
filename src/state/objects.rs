//! Object operations on committed objects.
use egui::Pos2;

use super::context::{Change, EditorContext};
use crate::document::{EditState, ObjectPatch, ObjectType, PositionPatch, factory};
use crate::error::EditError;

impl EditorContext {
    /// Add a default object of `object_type`, with `attributes` merged in, to the selected
    /// layer.
    pub fn add_new_object_to_layer(&mut self, object_type: ObjectType, attributes: ObjectPatch) {
        self.apply("add_new_object_to_layer", |document, config| {
            let mut object = factory::empty_object(object_type, config);
            object.apply_patch(&attributes)?;
            document.add_object_to_selected_layer(object)?;
            Ok(Change::Undoable)
        });
    }

    /// Merge `attributes` into an object. Fields absent from the patch are kept.
    pub fn update_object_attributes(&mut self, layer_name: &str, object_id: &str, attributes: ObjectPatch) {
        self.apply("update_object_attributes", |document, _| {
            document.layer_index(layer_name)?;
            let index = document.object_index(object_id)?;
            document.objects[index].apply_patch(&attributes)?;
            Ok(Change::Undoable)
        });
    }

    /// Merge `position` into an object's transform.
    pub fn change_position(&mut self, layer_name: &str, object_id: &str, position: PositionPatch) {
        self.apply("change_position", |document, _| {
            document.layer_index(layer_name)?;
            let index = document.object_index(object_id)?;
            document.objects[index].position.apply(&position);
            Ok(Change::Undoable)
        });
    }

    /// Move an object's anchor to `anchor`
    pub fn move_object(&mut self, layer_name: &str, object_id: &str, anchor: Pos2) {
        self.change_position(layer_name, object_id, PositionPatch::anchor(anchor));
    }

    pub fn scale_object(&mut self, layer_name: &str, object_id: &str, scale: f32) {
        self.change_position(layer_name, object_id, PositionPatch::scale(scale));
    }

    pub fn rotate_object(&mut self, layer_name: &str, object_id: &str, rotation: f32) {
        self.change_position(layer_name, object_id, PositionPatch::rotation(rotation));
    }

    /// Select an object of the selected layer and return to the resting mode.
    ///
    /// Objects of other layers cannot be selected.
    pub fn select_object_in_selected_layer(&mut self, layer_name: &str, object_id: &str) {
        self.apply("select_object_in_selected_layer", |document, _| {
            let index = document.selected_layer_index()?;
            let layer = &document.layers[index];
            if layer.name != layer_name || !layer.contains(object_id) {
                return Err(EditError::ObjectNotInLayer {
                    id: object_id.to_string(),
                    layer: layer_name.to_string(),
                });
            }

            document.edit_state = EditState::SelectObj;
            document.selected_object_id = Some(object_id.to_string());
            Ok(Change::Undoable)
        });
    }

    /// Remove the selected object from the selected layer.
    ///
    /// The object stays in the pool, unreferenced.
    pub fn remove_selected_object(&mut self) {
        self.apply("remove_selected_object", |document, _| {
            let index = document.selected_layer_index()?;
            let selected = document
                .selected_object_id
                .take()
                .ok_or(EditError::NoSelectedObject)?;

            document.layers[index].object_ids.retain(|id| *id != selected);
            document.edit_state = EditState::SelectObj;
            Ok(Change::Undoable)
        });
    }
}
