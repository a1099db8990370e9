//! Factory functions producing well-formed default values.
use egui::Pos2;

use super::{Document, EditState, Layer, ObjectType, PathPoint, Position, Shape, SvgObject};
use crate::config::EditorConfig;

/// Create an empty, visible, unselected layer
pub fn empty_layer(name: &str) -> Layer {
    Layer::new(name)
}

/// Create an object of the given type with default payload.
///
/// The id is left empty; it is assigned when the object is committed to a layer.
/// Polygons start as the degenerate two-point outline `M 0 0 L 0 0`.
pub fn empty_object(object_type: ObjectType, config: &EditorConfig) -> SvgObject {
    let mut position = Position::default();
    let shape = match object_type {
        ObjectType::Rect => Shape::Rect,
        ObjectType::Text => {
            position.set_size(config.text_size);
            Shape::Text {
                text: config.default_text.clone(),
            }
        }
        ObjectType::Polygon => Shape::Polygon {
            polygon: vec![
                PathPoint::move_to(Pos2::ZERO),
                PathPoint::line_to(Pos2::ZERO),
            ],
        },
    };
    SvgObject::new(String::new(), position, shape)
}

/// Polygon seeded at `anchor`: a move-to at the local origin followed by the live point
/// that tracks the pointer.
pub fn polygon_seed(anchor: Pos2, config: &EditorConfig) -> SvgObject {
    let mut polygon = empty_object(ObjectType::Polygon, config);
    polygon.position = Position::at(anchor);
    polygon
}

/// Create a mask layer from `layer`.
///
/// The mask shares the layer's object ids and is never selected on creation.
pub fn create_mask(layer: &Layer, config: &EditorConfig) -> Layer {
    Layer {
        name: config.mask_name_for(&layer.name),
        visible: layer.visible,
        selected: false,
        pre_selected: false,
        mask: true,
        mask_added: None,
        object_ids: layer.object_ids.clone(),
    }
}

/// Id for an object of `object_type` created when the pool holds `pool_size` objects.
///
/// Ids only stay unique because objects are never dropped from the pool.
pub fn object_id(object_type: ObjectType, pool_size: usize) -> String {
    format!("{}{}", object_type, pool_size)
}

/// `<prefix><layers + 1>`, bumped until no layer has that name
pub fn next_layer_name(layers: &[Layer], config: &EditorConfig) -> String {
    let mut number = layers.len() + 1;
    loop {
        let name = format!("{}{}", config.layer_name_prefix, number);
        if !layers.iter().any(|layer| layer.name == name) {
            return name;
        }
        number += 1;
    }
}

/// The startup document: a single selected layer and nothing else
pub fn seed_document(config: &EditorConfig) -> Document {
    let mut layer = empty_layer(&next_layer_name(&[], config));
    layer.selected = true;
    Document {
        layers: vec![layer],
        objects: Vec::new(),
        selected_object_id: None,
        edit_state: EditState::SelectObj,
    }
}
