#![no_main]

// Harness: search text validation and sanitizing never panic on arbitrary
// input, and accepted text always meets the minimum length.

use libfuzzer_sys::fuzz_target;
use content_visibility::{
    search::sanitize_text, ContentVisibility, InMemoryAssignmentStore, StaticGroupRegistry, VisibilityConfig,
};

fuzz_target!(|data: (u64, String)| {
    let (post_id, text) = data;
    let svc = ContentVisibility::new(InMemoryAssignmentStore::new(), StaticGroupRegistry::default(), VisibilityConfig::default());

    if svc.search_groups(post_id, &text).is_ok() {
        assert!(sanitize_text(&text).chars().count() >= 2);
    }
    if svc.search_editor_groups(post_id, &text).is_ok() {
        assert!(!sanitize_text(&text).is_empty());
    }
});
