use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::RecordId;

/// Unsaved syllabus topic input. The description may be left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentDraft {
    pub title: String,
    pub description: String,
}

impl ContentDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty()
    }
}

/// Content object echoed back by the server after creation.
///
/// Only handed to the caller; the client keeps no list of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_record_from_server() {
        let json = r#"{
            "id": 12,
            "silabo": 4,
            "titulo": "Semana 1 - Introducción a Algoritmos",
            "descripcion": null,
            "orden": 0
        }"#;
        let content: ContentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(content.id, Some(RecordId::Int(12)));
        assert_eq!(content.title, "Semana 1 - Introducción a Algoritmos");
        assert!(content.description.is_none());
        assert_eq!(content.extra.len(), 2);
    }

    #[test]
    fn test_content_record_minimal() {
        let content: ContentRecord = serde_json::from_str(r#"{"titulo": "Grafos"}"#).unwrap();

        assert!(content.id.is_none());
        assert_eq!(content.title, "Grafos");
    }

    #[test]
    fn test_content_draft_clear() {
        let mut draft = ContentDraft::new("Grafos", "BFS y DFS");
        draft.clear();
        assert!(draft.is_empty());
    }
}
