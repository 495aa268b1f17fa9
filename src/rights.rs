//!
//! Capability names recognised by the visibility engines.
//! Defines the meta and primitive capability names the host's role system
//! evaluates, plus the per-post-type mapping between them.

/// Core capability names.
pub mod core {
    /// Meta capability: may this user read this particular post?
    pub const READ_POST: &str = "read_post";
    /// Meta capability: may this user read this particular page?
    pub const READ_PAGE: &str = "read_page";
    /// Primitive capability held by every role that can read public content.
    pub const READ: &str = "read";

    pub const CREATE_PAGES: &str = "create_pages";
    pub const EDIT_PAGES: &str = "edit_pages";
    pub const EDIT_POST: &str = "edit_post";
    pub const EDIT_PAGE: &str = "edit_page";
    pub const PUBLISH_PAGES: &str = "publish_pages";
    pub const EDIT_OTHERS_PAGES: &str = "edit_others_pages";
    pub const EDIT_PUBLISHED_PAGES: &str = "edit_published_pages";

    /// Capabilities an editor-group member is checked for on a single page.
    pub const EDITOR_CHECKED: [&str; 4] = [EDIT_POST, EDIT_PAGE, PUBLISH_PAGES, EDIT_OTHERS_PAGES];

    /// Capabilities granted once editor-group membership is established.
    pub const EDITOR_GRANTED: [&str; 5] =
        [EDIT_POST, EDIT_PAGE, PUBLISH_PAGES, EDIT_OTHERS_PAGES, EDIT_PUBLISHED_PAGES];
}

/// Primitive capability names a post type maps its meta capabilities onto.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PostTypeCaps {
    /// Granted to anyone who may read a published post of this type.
    pub read: String,
    /// Required to read private posts of this type that one did not write.
    pub read_private_posts: String,
    pub edit_post: String,
    pub edit_others_posts: String,
    pub edit_published_posts: String,
    pub publish_posts: String,
}

impl PostTypeCaps {
    /// Builds the host's default mapping for a capability type, e.g. `"pages"`
    /// yields `read_private_pages`, `edit_others_pages` and so on.
    pub fn for_plural(plural: &str) -> Self {
        PostTypeCaps {
            read: core::READ.to_string(),
            read_private_posts: format!("read_private_{}", plural),
            edit_post: format!("edit_{}", plural.trim_end_matches('s')),
            edit_others_posts: format!("edit_others_{}", plural),
            edit_published_posts: format!("edit_published_{}", plural),
            publish_posts: format!("publish_{}", plural),
        }
    }
}

/// Returns `true` for the meta capabilities the read engine acts on.
#[inline]
pub fn is_read_meta_cap(cap: &str) -> bool {
    cap == core::READ_POST || cap == core::READ_PAGE
}

/// Returns `true` when `cap` is one of the per-page editing capabilities that
/// editor-group membership can unlock.
#[inline]
pub fn is_editor_checked_cap(cap: &str) -> bool {
    core::EDITOR_CHECKED.contains(&cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_plural_posts() {
        let caps = PostTypeCaps::for_plural("posts");
        assert_eq!(caps.read, "read");
        assert_eq!(caps.read_private_posts, "read_private_posts");
        assert_eq!(caps.edit_post, "edit_post");
        assert_eq!(caps.edit_others_posts, "edit_others_posts");
    }

    #[test]
    fn test_for_plural_pages() {
        let caps = PostTypeCaps::for_plural("pages");
        assert_eq!(caps.read_private_posts, "read_private_pages");
        assert_eq!(caps.edit_post, "edit_page");
        assert_eq!(caps.publish_posts, "publish_pages");
    }

    #[test]
    fn test_read_meta_caps() {
        assert!(is_read_meta_cap(core::READ_POST));
        assert!(is_read_meta_cap(core::READ_PAGE));
        assert!(!is_read_meta_cap(core::READ));
        assert!(!is_read_meta_cap("edit_post"));
    }

    #[test]
    fn test_editor_checked_caps() {
        assert!(is_editor_checked_cap(core::EDIT_OTHERS_PAGES));
        assert!(!is_editor_checked_cap(core::EDIT_PUBLISHED_PAGES));
        assert!(!is_editor_checked_cap(core::CREATE_PAGES));
    }
}
