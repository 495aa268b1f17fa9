//! The content visibility service.
//!
//! `ContentVisibility` is constructed once with its collaborators and handed
//! to whatever request handlers need it. It owns both decision engines and
//! implements the commands the admin UI issues.

pub mod response;

pub use response::{CommandResponse, EditorSaveOutcome, SaveOutcome};

use std::sync::Arc;

use crate::access::{AllCaps, CapabilitySet};
use crate::config::VisibilityConfig;
use crate::engine::{
    directory_group_details, DefaultOracle, DirectoryGroups, EditorEngine, MembershipOracle, NoDirectory,
    VisibilityEngine,
};
use crate::error::VisibilityError;
use crate::registry::GroupRegistry;
use crate::search::{sanitize_text, Clock, GroupSearch, NoSearch, SearchCache, SystemClock};
use crate::store::{AssignmentStore, MetaKey};
use crate::types::{DirectoryGroup, Group, GroupDetails, GroupId, GroupSet, Post, PostId, User};

/// Shared clock handle used by the search caches.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// The two caches behind the editor-group picker: raw directory results per
/// search term, and the picker record of every group a search returned,
/// keyed by DN.
struct DirectoryCaches {
    searches: SearchCache<SharedClock, Vec<DirectoryGroup>>,
    details: SearchCache<SharedClock, GroupDetails>,
}

impl DirectoryCaches {
    fn new(config: &VisibilityConfig, clock: SharedClock) -> Self {
        DirectoryCaches {
            searches: SearchCache::with_clock(config.cache_capacity(), config.directory_search_ttl(), Arc::clone(&clock)),
            details: SearchCache::with_clock(config.cache_capacity(), config.directory_details_ttl(), clock),
        }
    }
}

/// Group choices and current selection for the block editor panel.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GroupOptions {
    pub group_options: Vec<Group>,
    pub selected_group_ids: Vec<GroupId>,
}

fn require_post_id(post_id: PostId) -> Result<PostId, VisibilityError> {
    if post_id == 0 {
        Err(VisibilityError::InvalidPostId)
    } else {
        Ok(post_id)
    }
}

/// Visibility service wiring the store, registry, oracle, search backend and
/// directory together.
pub struct ContentVisibility<S, R, O = DefaultOracle, G = NoSearch, D = NoDirectory>
where
    S: AssignmentStore,
    R: GroupRegistry,
    O: MembershipOracle,
    G: GroupSearch,
    D: DirectoryGroups,
{
    store: Arc<S>,
    engine: VisibilityEngine<Arc<S>, O>,
    editors: EditorEngine<Arc<S>, D>,
    registry: R,
    search: G,
    cache: SearchCache<SharedClock>,
    directory_cache: DirectoryCaches,
    config: VisibilityConfig,
}

impl<S, R> ContentVisibility<S, R>
where
    S: AssignmentStore,
    R: GroupRegistry,
{
    /// Creates a service with the built-in oracle, no search backend and no
    /// directory.
    pub fn new(store: S, registry: R, config: VisibilityConfig) -> Self {
        let store = Arc::new(store);
        let clock: SharedClock = Arc::new(SystemClock);
        ContentVisibility {
            engine: VisibilityEngine::new(Arc::clone(&store), DefaultOracle, &config),
            editors: EditorEngine::new(Arc::clone(&store), NoDirectory, config.editor_roles.clone()),
            cache: SearchCache::with_clock(config.cache_capacity(), config.search_cache_ttl(), Arc::clone(&clock)),
            directory_cache: DirectoryCaches::new(&config, clock),
            store,
            registry,
            search: NoSearch,
            config,
        }
    }
}

impl<S, R, O, G, D> ContentVisibility<S, R, O, G, D>
where
    S: AssignmentStore,
    R: GroupRegistry,
    O: MembershipOracle,
    G: GroupSearch,
    D: DirectoryGroups,
{
    /// Replaces the membership oracle.
    pub fn with_oracle<O2: MembershipOracle>(self, oracle: O2) -> ContentVisibility<S, R, O2, G, D> {
        ContentVisibility {
            engine: VisibilityEngine::new(Arc::clone(&self.store), oracle, &self.config),
            editors: self.editors,
            store: self.store,
            registry: self.registry,
            search: self.search,
            cache: self.cache,
            directory_cache: self.directory_cache,
            config: self.config,
        }
    }

    /// Replaces the group search backend.
    pub fn with_search<G2: GroupSearch>(self, search: G2) -> ContentVisibility<S, R, O, G2, D> {
        ContentVisibility {
            engine: self.engine,
            editors: self.editors,
            store: self.store,
            registry: self.registry,
            search,
            cache: self.cache,
            directory_cache: self.directory_cache,
            config: self.config,
        }
    }

    /// Replaces the directory used for editor-group grants and searches.
    /// Drops cached directory results.
    pub fn with_directory<D2: DirectoryGroups>(self, directory: D2) -> ContentVisibility<S, R, O, G, D2> {
        self.directory_cache.searches.clear();
        self.directory_cache.details.clear();
        ContentVisibility {
            editors: EditorEngine::new(Arc::clone(&self.store), directory, self.config.editor_roles.clone()),
            engine: self.engine,
            store: self.store,
            registry: self.registry,
            search: self.search,
            cache: self.cache,
            directory_cache: self.directory_cache,
            config: self.config,
        }
    }

    /// Replaces the clock the search caches use for expiry. Drops cached entries.
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.cache =
            SearchCache::with_clock(self.config.cache_capacity(), self.config.search_cache_ttl(), Arc::clone(&clock));
        self.directory_cache = DirectoryCaches::new(&self.config, clock);
        self
    }

    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn engine(&self) -> &VisibilityEngine<Arc<S>, O> {
        &self.engine
    }

    pub fn search_cache(&self) -> &SearchCache<SharedClock> {
        &self.cache
    }

    /// See [`VisibilityEngine::resolve_read_capability`].
    pub fn resolve_read_capability(
        &self,
        post: Option<&Post>,
        requested: &str,
        user: &User,
        caps: CapabilitySet,
    ) -> CapabilitySet {
        self.engine.resolve_read_capability(post, requested, user, caps)
    }

    /// See [`EditorEngine::grant_editor_capabilities`].
    pub fn grant_editor_capabilities(
        &self,
        all_caps: AllCaps,
        requested: &str,
        user: &User,
        current_post: Option<&Post>,
    ) -> AllCaps {
        self.editors.grant_editor_capabilities(all_caps, requested, user, current_post)
    }

    /// save_assignment(post_id, submitted) → persisted set
    ///
    /// Unregistered ids are dropped. An empty result deletes the assignment.
    pub fn save_assignment(&self, post_id: PostId, submitted: &[GroupId]) -> Result<GroupSet, VisibilityError> {
        let post_id = require_post_id(post_id)?;
        let groups = self.registry.filter_known(submitted);

        if groups.is_empty() {
            self.store.delete(post_id, MetaKey::ViewerGroups)?;
            tracing::debug!(post_id, "Removed viewer group assignment");
        } else {
            self.store.put(post_id, MetaKey::ViewerGroups, &groups)?;
            tracing::debug!(post_id, count = groups.len(), "Saved viewer group assignment");
        }
        Ok(groups)
    }

    /// Block-editor write endpoint; identical to [`Self::save_assignment`].
    pub fn update_groups(&self, post_id: PostId, selected: &[GroupId]) -> Result<GroupSet, VisibilityError> {
        self.save_assignment(post_id, selected)
    }

    /// Block-editor read endpoint: every registered group plus the current
    /// selection. Post id 0 yields an empty selection.
    pub fn group_options(&self, post_id: PostId) -> Result<GroupOptions, VisibilityError> {
        let selected = if post_id == 0 { GroupSet::new() } else { self.store.get(post_id, MetaKey::ViewerGroups)? };
        Ok(GroupOptions {
            group_options: self.registry.default_groups(),
            selected_group_ids: selected.into_iter().collect(),
        })
    }

    /// Detail records for the groups assigned to `post_id`, all marked selected.
    pub fn get_current_groups(&self, post_id: PostId) -> Result<Vec<GroupDetails>, VisibilityError> {
        let post_id = require_post_id(post_id)?;
        let groups = self.store.get(post_id, MetaKey::ViewerGroups)?;

        Ok(groups
            .into_iter()
            .map(|id| {
                let mut details = self.search.details(GroupDetails::basic(id));
                details.selected = true;
                details
            })
            .collect())
    }

    /// Saves a submission from the group picker.
    pub fn set_groups(&self, post_id: PostId, submitted: &[GroupId]) -> Result<SaveOutcome, VisibilityError> {
        let post_id = require_post_id(post_id)?;
        if submitted.is_empty() {
            return Ok(SaveOutcome::NoChanges);
        }
        self.save_assignment(post_id, submitted)?;
        Ok(SaveOutcome::Saved)
    }

    /// Finds groups matching `text`, marking those already assigned to `post_id`.
    pub fn search_groups(&self, post_id: PostId, text: &str) -> Result<Vec<GroupDetails>, VisibilityError> {
        let text = sanitize_text(text);
        if text.is_empty() {
            return Err(VisibilityError::EmptySearchText);
        }
        if text.chars().count() < self.config.min_search_chars {
            return Err(VisibilityError::SearchTextTooShort { min: self.config.min_search_chars });
        }

        let current = if post_id == 0 { GroupSet::new() } else { self.store.get(post_id, MetaKey::ViewerGroups)? };

        let groups = match self.cache.get(&text) {
            Some(hit) if !hit.is_empty() => hit,
            _ => {
                let found = self.search.search(None, &text, post_id);
                self.cache.add(&text, found.clone());
                tracing::debug!(post_id, results = found.len(), "Group search cache miss");
                found
            }
        };

        Ok(groups
            .into_iter()
            .map(|mut group| {
                group.selected = current.contains(&group.id);
                group
            })
            .collect())
    }

    /// Detail records for the editor groups assigned to `post_id`, all
    /// marked selected. A group seen in a recent directory search shows that
    /// record; any other shows its DN as the display name.
    pub fn get_editor_groups(&self, post_id: PostId) -> Result<Vec<GroupDetails>, VisibilityError> {
        let post_id = require_post_id(post_id)?;
        let groups = self.store.get(post_id, MetaKey::EditorGroups)?;

        Ok(groups
            .into_iter()
            .map(|dn| {
                let mut details = self.directory_cache.details.get(&dn).unwrap_or_else(|| GroupDetails::basic(dn));
                details.selected = true;
                details
            })
            .collect())
    }

    /// Finds directory groups matching `text` for the editor-group picker.
    ///
    /// Only groups with members are returned. Each is marked selected when its
    /// DN is assigned to `post_id`; post id 0 has no assignment.
    pub fn search_editor_groups(&self, post_id: PostId, text: &str) -> Result<Vec<GroupDetails>, VisibilityError> {
        let text = sanitize_text(text);
        if text.is_empty() {
            return Err(VisibilityError::EmptyDirectoryGroup);
        }

        let current = if post_id == 0 { GroupSet::new() } else { self.store.get(post_id, MetaKey::EditorGroups)? };

        let found = match self.directory_cache.searches.get(&text) {
            Some(hit) if !hit.is_empty() => hit,
            _ => {
                let found = self.editors.directory().find_groups(&text);
                self.directory_cache.searches.add(&text, found.clone());
                tracing::debug!(post_id, results = found.len(), "Directory group search cache miss");
                found
            }
        };

        Ok(found
            .into_iter()
            .filter_map(directory_group_details)
            .map(|mut group| {
                self.directory_cache.details.add(&group.id, group.clone());
                group.selected = current.contains(&group.id);
                group
            })
            .collect())
    }

    /// Saves the editor groups for `post_id`. Entries are sanitized and blank
    /// ones dropped; directory groups are not checked against the registry.
    pub fn set_editor_groups(&self, post_id: PostId, submitted: &[GroupId]) -> Result<EditorSaveOutcome, VisibilityError> {
        let post_id = require_post_id(post_id)?;
        let groups: GroupSet = submitted.iter().map(|g| sanitize_text(g)).filter(|g| !g.is_empty()).collect();
        if groups.is_empty() {
            return Ok(EditorSaveOutcome::NoGroups);
        }

        self.store.put(post_id, MetaKey::EditorGroups, &groups)?;
        tracing::debug!(post_id, count = groups.len(), "Saved editor group assignment");
        Ok(EditorSaveOutcome::Saved)
    }
}
