use std::collections::HashSet;

use serde::{Deserialize, Serialize};

mod edit_state;
pub mod factory;
mod layer;
mod object;
pub mod path;

pub use edit_state::{EditMode, EditState, PointDrag};
pub use layer::Layer;
pub use object::{ObjectPatch, ObjectType, Position, PositionPatch, Shape, SvgObject};
pub use path::{CurveHandle, PathPoint};

use crate::config::EditorConfig;
use crate::error::{EditError, EditResult, ModelError};

/// The whole editable state: layers, object pool, selection and edit mode.
///
/// Values handed out by the editor are never mutated afterwards; every operation derives
/// a new `Document`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Paint and selection order
    pub layers: Vec<Layer>,
    /// Flat pool of objects referenced by id from layers
    pub objects: Vec<SvgObject>,
    #[serde(default)]
    pub selected_object_id: Option<String>,
    #[serde(default)]
    pub edit_state: EditState,
}

impl Default for Document {
    fn default() -> Self {
        factory::seed_document(&EditorConfig::default())
    }
}

impl Document {
    /// A document without any layers
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            objects: Vec::new(),
            selected_object_id: None,
            edit_state: EditState::SelectObj,
        }
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_state.mode()
    }

    /// The transient object of the gesture in progress
    pub fn edit_buffer(&self) -> Option<&SvgObject> {
        self.edit_state.buffer()
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn layer_index(&self, name: &str) -> EditResult<usize> {
        self.layers
            .iter()
            .position(|layer| layer.name == name)
            .ok_or_else(|| EditError::LayerNotFound(name.to_string()))
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.selected)
    }

    pub fn selected_layer_index(&self) -> EditResult<usize> {
        self.layers
            .iter()
            .position(|layer| layer.selected)
            .ok_or(EditError::NoSelectedLayer)
    }

    pub fn object(&self, id: &str) -> Option<&SvgObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn object_index(&self, id: &str) -> EditResult<usize> {
        self.objects
            .iter()
            .position(|object| object.id == id)
            .ok_or_else(|| EditError::ObjectNotFound(id.to_string()))
    }

    pub fn selected_object(&self) -> Option<&SvgObject> {
        self.selected_object_id.as_deref().and_then(|id| self.object(id))
    }

    /// Objects of a layer in paint order. Ids missing from the pool are skipped.
    pub fn layer_objects<'a>(&'a self, layer: &'a Layer) -> impl Iterator<Item = &'a SvgObject> + 'a {
        layer.object_ids.iter().filter_map(move |id| self.object(id))
    }

    /// Assigns the object its id, appends it to the pool and to the selected layer.
    pub fn add_object_to_selected_layer(&mut self, mut object: SvgObject) -> EditResult<String> {
        let layer_index = self.selected_layer_index()?;

        let id = factory::object_id(object.object_type(), self.objects.len());
        object.id = id.clone();
        self.objects.push(object);
        self.layers[layer_index].object_ids.push(id.clone());

        Ok(id)
    }

    /// Writes `object` back over the pool entry with the same id, keeping its index.
    pub fn replace_object(&mut self, object: SvgObject) -> EditResult<()> {
        let index = self.object_index(&object.id)?;
        self.objects[index] = object;
        Ok(())
    }

    /// Checks the structural invariants of a document.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut names = HashSet::new();
        for layer in &self.layers {
            if !names.insert(layer.name.as_str()) {
                return Err(ModelError::DuplicateLayerName(layer.name.clone()));
            }
        }

        let selected = self.layers.iter().filter(|layer| layer.selected).count();
        if selected > 1 {
            return Err(ModelError::MultipleSelectedLayers(selected));
        }
        let pre_selected = self.layers.iter().filter(|layer| layer.pre_selected).count();
        if pre_selected > 1 {
            return Err(ModelError::MultiplePreSelectedLayers(pre_selected));
        }

        let mut ids = HashSet::new();
        for object in &self.objects {
            if !ids.insert(object.id.as_str()) {
                return Err(ModelError::DuplicateObjectId(object.id.clone()));
            }
            if let Some(points) = object.polygon() {
                path::check_outline(&object.id, points)?;
            }
        }

        for layer in &self.layers {
            if let Some(id) = layer.object_ids.iter().find(|id| !ids.contains(id.as_str())) {
                return Err(ModelError::DanglingObjectId {
                    layer: layer.name.clone(),
                    id: id.clone(),
                });
            }
        }

        if let Some(id) = &self.selected_object_id {
            let in_selected_layer = self.selected_layer().is_some_and(|layer| layer.contains(id));
            if !in_selected_layer {
                return Err(ModelError::SelectionOutsideLayer(id.clone()));
            }
        }

        Ok(())
    }
}
