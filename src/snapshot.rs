//! JSON encoding of documents, used to seed the editor and to hand documents to storage.
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::SnapshotResult;

/// A serialized document together with the version of the crate that wrote it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub version: String,
    pub document: Document,
}

impl DocumentSnapshot {
    pub fn new(document: Document) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            document,
        }
    }
}

/// Serialize a document to pretty-printed JSON
pub fn encode(document: &Document) -> SnapshotResult<String> {
    let snapshot = DocumentSnapshot::new(document.clone());
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Parse and validate a document written by [`encode`].
///
/// Snapshots from other crate versions are accepted with a warning.
pub fn decode(json: &str) -> SnapshotResult<Document> {
    let snapshot: DocumentSnapshot = serde_json::from_str(json)?;
    if snapshot.version != env!("CARGO_PKG_VERSION") {
        log::warn!(
            "Snapshot version {} differs from current version {}",
            snapshot.version,
            env!("CARGO_PKG_VERSION")
        );
    }

    snapshot.document.validate()?;
    Ok(snapshot.document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ModelError, SnapshotError};

    #[test]
    fn test_decode_rejects_dangling_ids() {
        let mut document = Document::default();
        document.layers[0].object_ids.push("rect0".to_string());
        let json = encode(&document).unwrap();

        match decode(&json) {
            Err(SnapshotError::InvalidDocument(ModelError::DanglingObjectId { id, .. })) => {
                assert_eq!(id, "rect0")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_accepts_other_versions() {
        let json = r#"{
            "version": "0.0.1",
            "document": {
                "layers": [{ "name": "Layer1", "visible": true, "selected": true, "objectIds": ["rect0"] }],
                "objects": [{ "id": "rect0", "type": "rect", "position": { "x": 1.0, "y": 2.0 } }]
            }
        }"#;
        let document = decode(json).unwrap();
        assert_eq!(document.objects[0].position.scale, 1.0);
        assert_eq!(document.layers[0].object_ids, vec!["rect0".to_string()]);
    }

    #[test]
    fn test_garbage_is_a_serialization_error() {
        assert!(matches!(decode("{"), Err(SnapshotError::Serialization(_))));
    }
}
