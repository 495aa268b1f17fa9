//! Service configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Group, PostStatus};

fn default_restricted_status() -> PostStatus {
    PostStatus::Private
}

fn default_min_search_chars() -> usize {
    2
}

fn default_search_cache_ttl_secs() -> u64 {
    3600
}

fn default_directory_search_ttl_secs() -> u64 {
    600
}

fn default_directory_details_ttl_secs() -> u64 {
    1200
}

fn default_search_cache_capacity() -> usize {
    256
}

fn default_editor_roles() -> Vec<String> {
    vec!["administrator".into(), "editor".into()]
}

/// Top-level configuration for [`crate::service::ContentVisibility`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityConfig {
    /// Post status gated by viewer groups.
    #[serde(default = "default_restricted_status")]
    pub restricted_status: PostStatus,

    /// The built-in group every site member belongs to.
    #[serde(default = "Group::site_member")]
    pub site_member_group: Group,

    /// Minimum number of characters a group search must contain.
    #[serde(default = "default_min_search_chars")]
    pub min_search_chars: usize,

    /// How long a search result stays cached.
    #[serde(default = "default_search_cache_ttl_secs")]
    pub search_cache_ttl_secs: u64,

    /// How long a directory group search result stays cached.
    #[serde(default = "default_directory_search_ttl_secs")]
    pub directory_search_ttl_secs: u64,

    /// How long the details of a directory group seen in a search are kept
    /// for display next to an assigned editor group.
    #[serde(default = "default_directory_details_ttl_secs")]
    pub directory_details_ttl_secs: u64,

    /// Maximum number of entries in each cache.
    #[serde(default = "default_search_cache_capacity")]
    pub search_cache_capacity: usize,

    /// Roles that keep their own page-editing rights and may create pages.
    #[serde(default = "default_editor_roles")]
    pub editor_roles: Vec<String>,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        VisibilityConfig {
            restricted_status: default_restricted_status(),
            site_member_group: Group::site_member(),
            min_search_chars: default_min_search_chars(),
            search_cache_ttl_secs: default_search_cache_ttl_secs(),
            directory_search_ttl_secs: default_directory_search_ttl_secs(),
            directory_details_ttl_secs: default_directory_details_ttl_secs(),
            search_cache_capacity: default_search_cache_capacity(),
            editor_roles: default_editor_roles(),
        }
    }
}

impl VisibilityConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or fails [`Self::validate`].
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: VisibilityConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_search_chars == 0 {
            return Err(ConfigError::Validation("min_search_chars must be at least 1".into()));
        }
        if self.search_cache_capacity == 0 {
            return Err(ConfigError::Validation("search_cache_capacity must be non-zero".into()));
        }
        if self.site_member_group.id.trim().is_empty() {
            return Err(ConfigError::Validation("site_member_group.id must not be empty".into()));
        }
        Ok(())
    }

    pub fn search_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.search_cache_ttl_secs)
    }

    pub fn directory_search_ttl(&self) -> Duration {
        Duration::from_secs(self.directory_search_ttl_secs)
    }

    pub fn directory_details_ttl(&self) -> Duration {
        Duration::from_secs(self.directory_details_ttl_secs)
    }

    pub(crate) fn cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.search_cache_capacity).unwrap_or(NonZeroUsize::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = VisibilityConfig::from_json_str("{}").unwrap();
        assert_eq!(config, VisibilityConfig::default());
        assert_eq!(config.restricted_status, PostStatus::Private);
        assert_eq!(config.site_member_group.id, "site-member");
        assert_eq!(config.search_cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.directory_search_ttl(), Duration::from_secs(600));
        assert_eq!(config.directory_details_ttl(), Duration::from_secs(1200));
    }

    #[test]
    fn test_partial_override() {
        let config = VisibilityConfig::from_json_str(
            r#"{ "restricted_status": "pending", "min_search_chars": 3 }"#,
        )
        .unwrap();
        assert_eq!(config.restricted_status, PostStatus::Pending);
        assert_eq!(config.min_search_chars, 3);
        assert_eq!(config.search_cache_capacity, 256);
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let err = VisibilityConfig::from_json_str(r#"{ "search_cache_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_validation_rejects_blank_site_member_id() {
        let err = VisibilityConfig::from_json_str(
            r#"{ "site_member_group": { "id": " ", "name": "Nobody" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = VisibilityConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
