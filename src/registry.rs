//! Registry of endorsed viewer groups.
//!
//! Only groups listed here can be saved as a viewer assignment. The registry is
//! consulted on every render, save and validate call; callers must not cache it.

use crate::types::{Group, GroupId, GroupSet};

/// Supplies the current list of endorsed groups.
pub trait GroupRegistry {
    fn default_groups(&self) -> Vec<Group>;

    /// Drops every submitted id that is not an exact, case-sensitive match for
    /// a registered group.
    fn filter_known<'a, I>(&self, submitted: I) -> GroupSet
    where
        I: IntoIterator<Item = &'a GroupId>,
        Self: Sized,
    {
        let known: Vec<GroupId> = self.default_groups().into_iter().map(|g| g.id).collect();
        submitted
            .into_iter()
            .filter(|id| {
                let keep = known.contains(*id);
                if !keep {
                    tracing::debug!(group = %id, "Dropping unregistered group id");
                }
                keep
            })
            .cloned()
            .collect()
    }
}

/// Fixed list of groups, by default just the built-in site-member group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticGroupRegistry {
    groups: Vec<Group>,
}

impl StaticGroupRegistry {
    pub fn new(groups: Vec<Group>) -> Self {
        StaticGroupRegistry { groups }
    }

    /// Adds a group unless one with the same id is already registered.
    pub fn with_group(mut self, group: Group) -> Self {
        if !self.groups.iter().any(|g| g.id == group.id) {
            self.groups.push(group);
        }
        self
    }
}

impl Default for StaticGroupRegistry {
    fn default() -> Self {
        StaticGroupRegistry::new(vec![Group::site_member()])
    }
}

impl GroupRegistry for StaticGroupRegistry {
    fn default_groups(&self) -> Vec<Group> {
        self.groups.clone()
    }
}

impl<F> GroupRegistry for F
where
    F: Fn() -> Vec<Group>,
{
    fn default_groups(&self) -> Vec<Group> {
        self()
    }
}
