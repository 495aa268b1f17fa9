//! JSON envelope returned to the admin UI.
//!
//! Every command answers with `{"success": bool, "data": ...}`. On failure
//! `data` carries the human-readable error message.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::VisibilityError;

/// Result of a viewer-group save command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing was submitted; the stored assignment was left untouched.
    NoChanges,
    Saved,
}

impl SaveOutcome {
    pub fn message(self) -> &'static str {
        match self {
            SaveOutcome::NoChanges => "No changes.",
            SaveOutcome::Saved => "Changes saved.",
        }
    }
}

impl Serialize for SaveOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Result of an editor-group save command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorSaveOutcome {
    NoGroups,
    Saved,
}

impl EditorSaveOutcome {
    pub fn message(self) -> &'static str {
        match self {
            EditorSaveOutcome::NoGroups => "No groups passed. Success.",
            EditorSaveOutcome::Saved => "Groups saved.",
        }
    }
}

impl Serialize for EditorSaveOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    pub data: Value,
}

impl CommandResponse {
    pub fn success<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => CommandResponse { success: true, data },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize command result");
                CommandResponse::failure(e.to_string())
            }
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        CommandResponse { success: false, data: Value::String(message.into()) }
    }

    pub fn from_result<T: Serialize>(result: Result<T, VisibilityError>) -> Self {
        match result {
            Ok(data) => CommandResponse::success(&data),
            Err(e) => CommandResponse::failure(e.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_envelope() {
        let resp = CommandResponse::from_result::<SaveOutcome>(Err(VisibilityError::InvalidPostId));
        assert_eq!(resp.to_json().unwrap(), r#"{"success":false,"data":"Invalid post ID."}"#);
    }

    #[test]
    fn test_outcome_serializes_as_message() {
        let resp = CommandResponse::from_result(Ok(SaveOutcome::Saved));
        assert_eq!(resp.data, json!("Changes saved."));
        let resp = CommandResponse::from_result(Ok(EditorSaveOutcome::NoGroups));
        assert_eq!(resp.data, json!("No groups passed. Success."));
    }

    #[test]
    fn test_empty_list_envelope() {
        let resp = CommandResponse::from_result(Ok(Vec::<String>::new()));
        assert!(resp.success);
        assert_eq!(resp.data, json!([]));
    }
}
