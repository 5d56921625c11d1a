use serde::{Deserialize, Serialize};

/// Opaque identifier assigned by the server.
///
/// The backend issues integer keys, but nothing on the client depends on
/// that, so textual keys are accepted as well and round-trip unchanged.
///
/// Integer keys are signed 64-bit, the range of Django's `AutoField` and
/// `BigAutoField`. A JSON number above `i64::MAX` matches neither variant
/// and fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}
