use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use syllabus_core::{RecordId, RequestError};

/// Exam collection segment, relative to the API base.
pub const EXAMS_COLLECTION: &str = "examenes";

/// Content collection segment, relative to the API base.
pub const CONTENTS_COLLECTION: &str = "contenidos";

/// Request header carrying the anti-forgery token.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Path segments of a single exam, e.g. `["examenes", "7"]`.
///
/// The id always stays one segment; the URL builder percent-encodes `/`,
/// `?` and `%` inside it. Ids that would be read as empty or dot segments
/// have no URL of their own and are refused.
pub fn exam_segments(id: &RecordId) -> Result<[String; 2], RequestError> {
    let segment = id.to_string();
    if matches!(segment.as_str(), "" | "." | "..") {
        return Err(RequestError::InvalidId(segment));
    }
    Ok([EXAMS_COLLECTION.to_string(), segment])
}

/// Body for creating or replacing an exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamPayload {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
}

impl ExamPayload {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}

/// Body for creating a syllabus content entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPayload {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
}

impl ContentPayload {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_segments() {
        assert_eq!(
            exam_segments(&RecordId::Int(7)).unwrap(),
            ["examenes".to_string(), "7".to_string()]
        );
        assert_eq!(
            exam_segments(&RecordId::from("a/b")).unwrap()[1],
            "a/b"
        );
    }

    #[test]
    fn test_exam_segments_refuses_dot_ids() {
        for raw in ["", ".", ".."] {
            assert_eq!(
                exam_segments(&RecordId::from(raw)),
                Err(RequestError::InvalidId(raw.to_string()))
            );
        }
        assert!(exam_segments(&RecordId::from("..x")).is_ok());
    }

    #[test]
    fn test_exam_payload_json() {
        let payload = ExamPayload::new("Final", NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "nombre": "Final", "fecha": "2025-12-01" })
        );
    }

    #[test]
    fn test_content_payload_json() {
        let payload = ContentPayload::new("Semana 1", "");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "titulo": "Semana 1", "descripcion": "" })
        );
    }
}
