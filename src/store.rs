//! Group assignment storage.
//!
//! Assignments live in the host's generic post-metadata store. The trait here
//! is the typed view of that store: it always hands back a [`GroupSet`], empty
//! when nothing is recorded, so "no value" and "empty set" cannot diverge.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;
use crate::types::{GroupSet, PostId};

/// Metadata key an assignment is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaKey {
    /// Groups allowed to read a restricted post.
    ViewerGroups,
    /// Directory groups allowed to edit a post.
    EditorGroups,
}

impl MetaKey {
    /// The key name used in the host's metadata table.
    pub fn as_str(self) -> &'static str {
        match self {
            MetaKey::ViewerGroups => "_content_visibility_viewer_groups",
            MetaKey::EditorGroups => "_ad_editor_groups",
        }
    }
}

/// Typed access to per-post group assignments.
///
/// Writes take `&self`: the store is a shared external resource and
/// implementations provide their own interior mutability.
pub trait AssignmentStore {
    /// Returns the stored groups, or an empty set when none are stored.
    fn get(&self, post_id: PostId, key: MetaKey) -> Result<GroupSet, StoreError>;

    /// Replaces any prior assignment with `groups`.
    fn put(&self, post_id: PostId, key: MetaKey, groups: &GroupSet) -> Result<(), StoreError>;

    /// Removes the assignment entirely. Deleting a missing record is not an error.
    fn delete(&self, post_id: PostId, key: MetaKey) -> Result<(), StoreError>;
}

impl<S: AssignmentStore + ?Sized> AssignmentStore for &S {
    fn get(&self, post_id: PostId, key: MetaKey) -> Result<GroupSet, StoreError> {
        (**self).get(post_id, key)
    }

    fn put(&self, post_id: PostId, key: MetaKey, groups: &GroupSet) -> Result<(), StoreError> {
        (**self).put(post_id, key, groups)
    }

    fn delete(&self, post_id: PostId, key: MetaKey) -> Result<(), StoreError> {
        (**self).delete(post_id, key)
    }
}

impl<S: AssignmentStore + ?Sized> AssignmentStore for std::sync::Arc<S> {
    fn get(&self, post_id: PostId, key: MetaKey) -> Result<GroupSet, StoreError> {
        (**self).get(post_id, key)
    }

    fn put(&self, post_id: PostId, key: MetaKey, groups: &GroupSet) -> Result<(), StoreError> {
        (**self).put(post_id, key, groups)
    }

    fn delete(&self, post_id: PostId, key: MetaKey) -> Result<(), StoreError> {
        (**self).delete(post_id, key)
    }
}

/// Process-local store, used for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryAssignmentStore {
    records: RwLock<HashMap<(PostId, MetaKey), GroupSet>>,
}

impl InMemoryAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record exists at all, as opposed to reading back empty.
    pub fn contains(&self, post_id: PostId, key: MetaKey) -> bool {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.contains_key(&(post_id, key))
    }

    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AssignmentStore for InMemoryAssignmentStore {
    fn get(&self, post_id: PostId, key: MetaKey) -> Result<GroupSet, StoreError> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(&(post_id, key)).cloned().unwrap_or_default())
    }

    fn put(&self, post_id: PostId, key: MetaKey, groups: &GroupSet) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.insert((post_id, key), groups.clone());
        Ok(())
    }

    fn delete(&self, post_id: PostId, key: MetaKey) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        records.remove(&(post_id, key));
        Ok(())
    }
}
