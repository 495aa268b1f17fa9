//! Test doubles shared by unit tests, integration tests and benches.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::engine::{DirectoryGroups, MembershipOracle};
use crate::error::StoreError;
use crate::search::{Clock, GroupSearch};
use crate::store::{AssignmentStore, MetaKey};
use crate::types::{DirectoryGroup, GroupDetails, GroupSet, PostId, User, UserId};

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    start: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock { start: Instant::now(), offset: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Oracle returning a fixed answer and recording every invocation.
/// Clones share the same call log.
#[derive(Debug, Default, Clone)]
pub struct RecordingOracle {
    answer: Option<bool>,
    calls: Arc<Mutex<Vec<(bool, UserId, GroupSet)>>>,
}

impl RecordingOracle {
    /// Always answers `answer`, ignoring the built-in result.
    pub fn fixed(answer: bool) -> Self {
        RecordingOracle { answer: Some(answer), calls: Arc::default() }
    }

    /// Passes the built-in result through unchanged.
    pub fn passthrough() -> Self {
        RecordingOracle::default()
    }

    pub fn calls(&self) -> Vec<(bool, UserId, GroupSet)> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl MembershipOracle for RecordingOracle {
    fn is_member(&self, default: bool, user_id: UserId, groups: &GroupSet) -> bool {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push((default, user_id, groups.clone()));
        self.answer.unwrap_or(default)
    }
}

/// Search backend answering from a fixed table and counting lookups.
/// Clones share the same lookup counter.
#[derive(Debug, Default, Clone)]
pub struct TableSearch {
    table: Vec<(String, Vec<GroupDetails>)>,
    lookups: Arc<Mutex<usize>>,
}

impl TableSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, groups: Vec<GroupDetails>) -> Self {
        self.table.push((text.to_string(), groups));
        self
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl GroupSearch for TableSearch {
    fn search(&self, _previous: Option<Vec<GroupDetails>>, text: &str, _post_id: PostId) -> Vec<GroupDetails> {
        *self.lookups.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        self.table.iter().find(|(t, _)| t == text).map(|(_, g)| g.clone()).unwrap_or_default()
    }
}

/// Directory answering searches from a fixed table and counting lookups.
/// Every user belongs to the groups given to [`TableDirectory::member_of`].
/// Clones share the same lookup counter.
#[derive(Debug, Default, Clone)]
pub struct TableDirectory {
    member_of: GroupSet,
    table: Vec<(String, Vec<DirectoryGroup>)>,
    lookups: Arc<Mutex<usize>>,
}

impl TableDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member_of<I, S>(mut self, dns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.member_of = dns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with(mut self, text: &str, groups: Vec<DirectoryGroup>) -> Self {
        self.table.push((text.to_string(), groups));
        self
    }

    pub fn lookups(&self) -> usize {
        *self.lookups.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DirectoryGroups for TableDirectory {
    fn groups_for(&self, _user: &User) -> GroupSet {
        self.member_of.clone()
    }

    fn find_groups(&self, text: &str) -> Vec<DirectoryGroup> {
        *self.lookups.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        self.table.iter().find(|(t, _)| t == text).map(|(_, g)| g.clone()).unwrap_or_default()
    }
}

/// Store whose every operation fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl AssignmentStore for FailingStore {
    fn get(&self, _post_id: PostId, _key: MetaKey) -> Result<GroupSet, StoreError> {
        Err(StoreError::Unavailable("offline".into()))
    }

    fn put(&self, _post_id: PostId, _key: MetaKey, _groups: &GroupSet) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".into()))
    }

    fn delete(&self, _post_id: PostId, _key: MetaKey) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".into()))
    }
}
