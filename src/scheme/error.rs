use serde::{Deserialize, Serialize};

/// Error body returned by Veryfi.
///
/// Every field is optional on the wire; the HTTP status line is filled in by
/// the transport when the response status itself signals an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub status: String,
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiErrorBody {
    /// `true` when every field is at its zero value.
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
            && self.error.is_empty()
            && self.message.is_empty()
            && self.details_str().is_none()
    }

    /// Whether a 2xx body still describes a failure.
    ///
    /// Informational bodies such as `{"status": "ok", "message": "..."}` do not.
    pub fn is_failure(&self) -> bool {
        !self.error.is_empty()
            || self.details_str().is_some()
            || self.status.eq_ignore_ascii_case("fail")
    }

    /// `details` rendered as text; `None` when absent, null or empty.
    pub fn details_str(&self) -> Option<String> {
        match self.details.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(a) if a.is_empty() => None,
            serde_json::Value::Object(o) if o.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}
