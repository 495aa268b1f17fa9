use criterion::{criterion_group, criterion_main, Criterion};
use content_visibility::rights::core;
use content_visibility::store::{AssignmentStore, InMemoryAssignmentStore, MetaKey};
use content_visibility::{CapabilitySet, DefaultOracle, GroupSet, Post, PostType, User, VisibilityConfig, VisibilityEngine};

fn resolve_benchmarks(c: &mut Criterion) {
    let store = InMemoryAssignmentStore::new();
    let groups: GroupSet = ["site-member", "eng-dept"].iter().map(|s| s.to_string()).collect();
    store.put(1, MetaKey::ViewerGroups, &groups).unwrap();
    let engine = VisibilityEngine::new(store, DefaultOracle, &VisibilityConfig::default());

    let post = Post::new(1, "private", Some(42), PostType::post());
    let member = User::member(7);
    let outsider = User::non_member(8);
    let caps: CapabilitySet = ["read_private_posts"].into_iter().collect();

    c.bench_function("resolve_read_granted", |b| {
        b.iter(|| engine.resolve_read_capability(Some(&post), core::READ_POST, &member, caps.clone()))
    });

    c.bench_function("resolve_read_denied", |b| {
        b.iter(|| engine.resolve_read_capability(Some(&post), core::READ_POST, &outsider, caps.clone()))
    });
}

criterion_group!(benches, resolve_benchmarks);
criterion_main!(benches);
