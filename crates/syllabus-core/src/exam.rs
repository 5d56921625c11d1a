use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::RecordId;

/// A scheduled exam as stored by the server.
///
/// Wire shape is `{id, nombre, fecha}`. Any other field the server attaches
/// is kept in `extra` so a stored record compares equal to what the server
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    pub id: RecordId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExamRecord {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
            extra: Map::new(),
        }
    }

    /// One-line rendering used by list views, e.g. `Parcial 1 / 2025-10-25`.
    pub fn display_line(&self) -> String {
        format!("{} / {}", self.name, self.date.format("%Y-%m-%d"))
    }
}

/// Unsaved exam form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamDraft {
    pub name: String,
    /// `None` until the date picker holds a value.
    pub date: Option<NaiveDate>,
}

impl ExamDraft {
    pub fn new(name: impl Into<String>, date: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.date.is_none()
    }
}
