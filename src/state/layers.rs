//! Layer operations. Layers are addressed by name.
use super::context::{Change, EditorContext};
use crate::document::factory;
use crate::error::EditError;

impl EditorContext {
    /// Show or hide a layer. Clears the object selection.
    pub fn change_layer_visibility(&mut self, layer_name: &str) {
        self.apply("change_layer_visibility", |document, _| {
            let index = document.layer_index(layer_name)?;
            let layer = &mut document.layers[index];
            layer.visible = !layer.visible;
            document.selected_object_id = None;
            Ok(Change::Undoable)
        });
    }

    /// Make `layer_name` the layer that receives new objects.
    ///
    /// The object selection is cleared since it may belong to the previous layer.
    pub fn select_layer(&mut self, layer_name: &str) {
        self.apply("select_layer", |document, _| {
            let index = document.layer_index(layer_name)?;
            for (i, layer) in document.layers.iter_mut().enumerate() {
                layer.selected = i == index;
            }
            document.selected_object_id = None;
            Ok(Change::Undoable)
        });
    }

    /// Highlight a layer (hover in the layer list). Replaces any previous highlight.
    pub fn pre_select_layer(&mut self, layer_name: &str) {
        self.apply("pre_select_layer", |document, _| {
            let index = document.layer_index(layer_name)?;
            for (i, layer) in document.layers.iter_mut().enumerate() {
                layer.pre_selected = i == index;
            }
            Ok(Change::Transient)
        });
    }

    pub fn un_pre_select_layer(&mut self, layer_name: &str) {
        self.apply("un_pre_select_layer", |document, _| {
            let index = document.layer_index(layer_name)?;
            document.layers[index].pre_selected = false;
            Ok(Change::Transient)
        });
    }

    /// Remove the selected layer.
    ///
    /// Deleting a mask also detaches it from every layer it was applied to. Objects of
    /// the layer stay in the pool.
    pub fn delete_selected_layer(&mut self) {
        self.apply("delete_selected_layer", |document, _| {
            let index = document.selected_layer_index()?;
            let removed = document.layers.remove(index);

            if removed.mask {
                for layer in &mut document.layers {
                    if layer.mask_added.as_deref() == Some(removed.name.as_str()) {
                        layer.mask_added = None;
                    }
                }
            }

            document.selected_object_id = None;
            Ok(Change::Undoable)
        });
    }

    /// Append an empty layer named after the configured prefix.
    pub fn add_new_layer(&mut self) {
        self.apply("add_new_layer", |document, config| {
            let name = factory::next_layer_name(&document.layers, config);
            document.layers.push(factory::empty_layer(&name));
            Ok(Change::Undoable)
        });
    }

    /// Swap the selected layer with the one before it
    pub fn move_up_selected_layer(&mut self) {
        self.apply("move_up_selected_layer", |document, _| {
            let index = document.selected_layer_index()?;
            if index == 0 {
                return Err(EditError::AtBoundary);
            }
            document.layers.swap(index, index - 1);
            Ok(Change::Undoable)
        });
    }

    /// Swap the selected layer with the one after it
    pub fn move_down_selected_layer(&mut self) {
        self.apply("move_down_selected_layer", |document, _| {
            let index = document.selected_layer_index()?;
            if index + 1 >= document.layers.len() {
                return Err(EditError::AtBoundary);
            }
            document.layers.swap(index, index + 1);
            Ok(Change::Undoable)
        });
    }

    /// Create (or refresh) the mask derived from the selected layer.
    ///
    /// A layer that already carries the mask's name is replaced in place, otherwise the
    /// mask is appended.
    pub fn create_mask_from_selected_layer(&mut self) {
        self.apply("create_mask_from_selected_layer", |document, config| {
            let index = document.selected_layer_index()?;
            let mask = factory::create_mask(&document.layers[index], config);

            match document.layer_index(&mask.name) {
                Ok(existing) => document.layers[existing] = mask,
                Err(_) => document.layers.push(mask),
            }
            Ok(Change::Undoable)
        });
    }

    /// Apply the selected layer, which must be a mask, to `layer_name`.
    pub fn apply_mask_to_layer(&mut self, layer_name: &str) {
        self.apply("apply_mask_to_layer", |document, _| {
            let mask_index = document.selected_layer_index()?;
            let mask = &document.layers[mask_index];
            if !mask.mask {
                return Err(EditError::NotAMask(mask.name.clone()));
            }
            let mask_name = mask.name.clone();

            let index = document.layer_index(layer_name)?;
            document.layers[index].mask_added = Some(mask_name);
            Ok(Change::Undoable)
        });
    }

    /// Detach whatever mask is applied to `layer_name`
    pub fn remove_mask_from_layer(&mut self, layer_name: &str) {
        self.apply("remove_mask_from_layer", |document, _| {
            let index = document.layer_index(layer_name)?;
            document.layers[index].mask_added = None;
            Ok(Change::Undoable)
        });
    }
}
