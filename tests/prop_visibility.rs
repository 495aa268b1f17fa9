use proptest::prelude::*;

use content_visibility::rights::core;
use content_visibility::store::{AssignmentStore, InMemoryAssignmentStore, MetaKey};
use content_visibility::testing::RecordingOracle;
use content_visibility::{
    CapabilitySet, ContentVisibility, Group, GroupId, GroupSet, Post, PostStatus, PostType, StaticGroupRegistry, User,
    VisibilityConfig, VisibilityEngine,
};

const POST_ID: u64 = 5;

fn status_strategy() -> impl Strategy<Value = PostStatus> {
    prop_oneof![
        Just(PostStatus::Publish),
        Just(PostStatus::Private),
        Just(PostStatus::Password),
        Just(PostStatus::Draft),
        Just(PostStatus::Pending),
        "[a-z]{1,8}".prop_map(PostStatus::from),
    ]
}

fn caps_strategy() -> impl Strategy<Value = CapabilitySet> {
    prop::collection::vec(
        prop_oneof![
            Just("read_private_posts".to_string()),
            Just("read".to_string()),
            Just("edit_posts".to_string()),
            "[a-z_]{1,12}",
        ],
        0..6,
    )
    .prop_map(|names| names.into_iter().collect())
}

fn groups_strategy() -> impl Strategy<Value = GroupSet> {
    prop::collection::btree_set(prop_oneof![Just("site-member".to_string()), "[a-z-]{1,10}"], 0..4)
}

fn user_strategy() -> impl Strategy<Value = User> {
    (prop::option::of(0u64..100), any::<bool>()).prop_map(|(id, site_member)| User { id, site_member, ..User::default() })
}

fn engine(groups: &GroupSet, answer: bool) -> VisibilityEngine<InMemoryAssignmentStore, RecordingOracle> {
    let store = InMemoryAssignmentStore::new();
    if !groups.is_empty() {
        store.put(POST_ID, MetaKey::ViewerGroups, groups).unwrap();
    }
    VisibilityEngine::new(store, RecordingOracle::fixed(answer), &VisibilityConfig::default())
}

proptest! {
    /// Anything other than the restricted status passes through unchanged.
    #[test]
    fn prop_non_restricted_is_identity(
        status in status_strategy(),
        caps in caps_strategy(),
        groups in groups_strategy(),
        user in user_strategy(),
        answer in any::<bool>(),
    ) {
        prop_assume!(status != PostStatus::Private);
        let post = Post::new(POST_ID, status, Some(1000), PostType::post());
        let out = engine(&groups, answer).resolve_read_capability(Some(&post), core::READ_POST, &user, caps.clone());
        prop_assert_eq!(out, caps);
    }

    /// The author always keeps the host's answer.
    #[test]
    fn prop_author_is_identity(
        author in 0u64..100,
        caps in caps_strategy(),
        groups in groups_strategy(),
        answer in any::<bool>(),
    ) {
        let post = Post::new(POST_ID, PostStatus::Private, Some(author), PostType::post());
        let out = engine(&groups, answer).resolve_read_capability(Some(&post), core::READ_POST, &User::member(author), caps.clone());
        prop_assert_eq!(out, caps);
    }

    /// Without an assignment the oracle is irrelevant.
    #[test]
    fn prop_unassigned_is_identity(caps in caps_strategy(), user in user_strategy(), answer in any::<bool>()) {
        let post = Post::new(POST_ID, PostStatus::Private, Some(1000), PostType::post());
        let out = engine(&GroupSet::new(), answer).resolve_read_capability(Some(&post), core::READ_POST, &user, caps.clone());
        prop_assert_eq!(out, caps);
    }

    /// A granting oracle yields exactly one `read` and no `read_private_posts`;
    /// a denying one leaves the list alone.
    #[test]
    fn prop_oracle_decides(
        caps in caps_strategy(),
        mut groups in groups_strategy(),
        id in 0u64..100,
        answer in any::<bool>(),
    ) {
        groups.insert("eng-dept".to_string());
        prop_assume!(!caps.contains(core::READ_POST));
        let post = Post::new(POST_ID, PostStatus::Private, Some(1000), PostType::post());
        let out = engine(&groups, answer).resolve_read_capability(Some(&post), core::READ_POST, &User::non_member(id), caps.clone());

        if answer {
            prop_assert_eq!(out.count("read"), 1);
            prop_assert!(!out.contains("read_private_posts"));
            let kept: Vec<&str> = caps.names().filter(|n| *n != "read" && *n != "read_private_posts").collect();
            let out_kept: Vec<&str> = out.names().filter(|n| *n != "read").collect();
            prop_assert_eq!(kept, out_kept);
        } else {
            prop_assert_eq!(out, caps);
        }
    }

    /// Saving the same submission twice is the same as saving it once, and
    /// only registered ids ever reach the store.
    #[test]
    fn prop_save_is_idempotent(submitted in prop::collection::vec(prop_oneof![
        Just("site-member".to_string()),
        Just("eng-dept".to_string()),
        "[a-z-]{1,10}",
    ], 0..6)) {
        let registry = StaticGroupRegistry::default().with_group(Group::new("eng-dept", "Engineering"));
        let svc = ContentVisibility::new(InMemoryAssignmentStore::new(), registry, VisibilityConfig::default());
        let submitted: Vec<GroupId> = submitted;

        svc.save_assignment(POST_ID, &submitted).unwrap();
        let once = svc.store().get(POST_ID, MetaKey::ViewerGroups).unwrap();
        svc.save_assignment(POST_ID, &submitted).unwrap();
        let twice = svc.store().get(POST_ID, MetaKey::ViewerGroups).unwrap();

        prop_assert_eq!(&once, &twice);
        prop_assert!(once.iter().all(|g| g == "site-member" || g == "eng-dept"));
        prop_assert_eq!(svc.store().contains(POST_ID, MetaKey::ViewerGroups), !once.is_empty());
    }
}
