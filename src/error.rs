//!
//! Defines error types for the visibility service.
//!
//! The decision engines never return these; they resolve every ambiguous case
//! to "no change". Errors only surface from the command layer, where their
//! `Display` text is the message shown to the editor.

/// Errors raised by the post-metadata store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached or refused the operation.
    #[error("Assignment store unavailable: {0}")]
    Unavailable(String),
}

/// Represents errors that can occur while handling a visibility command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisibilityError {
    /// The post id was missing or zero.
    #[error("Invalid post ID.")]
    InvalidPostId,
    /// The search text was empty after sanitizing.
    #[error("Empty search text was submitted.")]
    EmptySearchText,
    /// The search text was shorter than the configured minimum.
    #[error("{}", too_short_message(.min))]
    SearchTextTooShort { min: usize },
    /// The editor-group search text was empty after sanitizing.
    #[error("Empty AD group was passed.")]
    EmptyDirectoryGroup,
    /// Reading or writing an assignment failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn too_short_message(min: &usize) -> String {
    match *min {
        0..=2 => "Please provide more than one character.".to_string(),
        n => format!("Please provide at least {n} characters."),
    }
}

/// Errors raised while loading a [`crate::config::VisibilityConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_ui_contract() {
        assert_eq!(VisibilityError::InvalidPostId.to_string(), "Invalid post ID.");
        assert_eq!(VisibilityError::EmptySearchText.to_string(), "Empty search text was submitted.");
        assert_eq!(
            VisibilityError::SearchTextTooShort { min: 2 }.to_string(),
            "Please provide more than one character."
        );
        assert_eq!(VisibilityError::EmptyDirectoryGroup.to_string(), "Empty AD group was passed.");
    }

    #[test]
    fn test_too_short_message_names_configured_minimum() {
        assert_eq!(
            VisibilityError::SearchTextTooShort { min: 4 }.to_string(),
            "Please provide at least 4 characters."
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err: VisibilityError = StoreError::Unavailable("timeout".into()).into();
        assert_eq!(err.to_string(), "Assignment store unavailable: timeout");
    }
}
