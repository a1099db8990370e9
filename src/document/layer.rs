use serde::{Deserialize, Serialize};

/// A named group of objects.
///
/// The name doubles as the layer's identifier: masks refer to layers by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    /// The layer that receives new objects; at most one per document
    #[serde(default)]
    pub selected: bool,
    /// Hover highlight; at most one per document
    #[serde(default)]
    pub pre_selected: bool,
    /// This layer is a mask source
    #[serde(default)]
    pub mask: bool,
    /// Name of the mask layer applied to this layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask_added: Option<String>,
    /// Ids into the document's object pool, in paint order
    #[serde(default)]
    pub object_ids: Vec<String>,
}

impl Layer {
    /// Creates a visible, unselected, empty layer
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            visible: true,
            selected: false,
            pre_selected: false,
            mask: false,
            mask_added: None,
            object_ids: Vec::new(),
        }
    }

    pub fn contains(&self, object_id: &str) -> bool {
        self.object_ids.iter().any(|id| id == object_id)
    }
}
