use egui::Vec2;
use serde::{Deserialize, Serialize};

/// Tunables for the editor state machine.
///
/// Every field has a default, so a config file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Manhattan distance (in the polygon's local units) under which a click next to the
    /// anchor closes the polygon instead of adding a vertex.
    pub close_path_threshold: f32,
    /// Size of text boxes created by a single click
    pub text_size: Vec2,
    /// Content of a freshly created text object
    pub default_text: String,
    /// New layers are named `<prefix><n>`
    pub layer_name_prefix: String,
    /// A mask created from layer `L` is named `L<suffix>`
    pub mask_name_suffix: String,
    /// Maximum number of undo snapshots kept. 0 keeps everything.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            close_path_threshold: 10.0,
            text_size: Vec2::new(100.0, 50.0),
            default_text: "Text".to_string(),
            layer_name_prefix: "Layer".to_string(),
            mask_name_suffix: "Mask".to_string(),
            history_limit: 100,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Name used for the mask created from `layer_name`
    pub fn mask_name_for(&self, layer_name: &str) -> String {
        format!("{}{}", layer_name, self.mask_name_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config = EditorConfig::from_json(r#"{ "close_path_threshold": 4.0 }"#).unwrap();
        assert_eq!(config.close_path_threshold, 4.0);
        assert_eq!(config.text_size, Vec2::new(100.0, 50.0));
        assert_eq!(config.layer_name_prefix, "Layer");
    }

    #[test]
    fn test_mask_name() {
        let config = EditorConfig::default();
        assert_eq!(config.mask_name_for("Layer1"), "Layer1Mask");
    }
}
