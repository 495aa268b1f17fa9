#![no_main]

// Harness: resolve_read_capability never panics, and only ever changes the
// list on a grant, leaving exactly one `read` behind.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use content_visibility::{
    rights::core,
    store::{AssignmentStore, InMemoryAssignmentStore, MetaKey},
    CapabilitySet, DefaultOracle, GroupSet, Post, PostType, User, VisibilityConfig, VisibilityEngine,
};

#[derive(Arbitrary, Debug, Clone)]
struct ReadFrame {
    status: String,
    author: Option<u64>,
    user: Option<u64>,
    site_member: bool,
    is_page: bool,
    requested: u8,
    groups: Vec<String>,
    caps: Vec<(String, bool)>,
}

fuzz_target!(|frame: ReadFrame| {
    let store = InMemoryAssignmentStore::new();
    let groups: GroupSet = frame.groups.into_iter().collect();
    if !groups.is_empty() {
        let _ = store.put(1, MetaKey::ViewerGroups, &groups);
    }
    let engine = VisibilityEngine::new(store, DefaultOracle, &VisibilityConfig::default());

    let post_type = if frame.is_page { PostType::page() } else { PostType::post() };
    let post = Post::new(1, frame.status.as_str(), frame.author, post_type);
    let user = User { id: frame.user, site_member: frame.site_member, ..User::default() };
    let requested = match frame.requested % 3 {
        0 => core::READ_POST,
        1 => core::READ_PAGE,
        _ => core::EDIT_POST,
    };

    let mut caps = CapabilitySet::new();
    for (name, granted) in frame.caps {
        caps.push_entry(name, granted);
    }

    let out = engine.resolve_read_capability(Some(&post), requested, &user, caps.clone());
    if out != caps {
        assert_eq!(out.count(core::READ), 1);
        assert!(!out.contains(&post.post_type.caps.read_private_posts));
    }
});
