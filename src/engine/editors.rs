//! Editor-group capability grants.
//!
//! A post can list directory groups whose members may edit it even though
//! their role would not normally allow editing other people's pages. Users in
//! an editor role (administrators and editors by default) are left to the host.

use crate::access::AllCaps;
use crate::rights::{self, core};
use crate::store::{AssignmentStore, MetaKey};
use crate::types::{DirectoryGroup, GroupDetails, GroupSet, Post, User};

/// Resolves the directory groups a user belongs to.
pub trait DirectoryGroups {
    fn groups_for(&self, user: &User) -> GroupSet;

    /// Directory groups matching `text`, for the editor-group picker.
    /// The default finds nothing.
    fn find_groups(&self, _text: &str) -> Vec<DirectoryGroup> {
        Vec::new()
    }
}

/// Directory with no groups. Editor-group grants never apply.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoDirectory;

impl DirectoryGroups for NoDirectory {
    fn groups_for(&self, _user: &User) -> GroupSet {
        GroupSet::new()
    }
}

impl<F> DirectoryGroups for F
where
    F: Fn(&User) -> GroupSet,
{
    fn groups_for(&self, user: &User) -> GroupSet {
        self(user)
    }
}

/// Grants page-editing capabilities through editor-group membership.
#[derive(Debug, Clone)]
pub struct EditorEngine<S: AssignmentStore, D: DirectoryGroups> {
    store: S,
    directory: D,
    editor_roles: Vec<String>,
}

impl<S, D> EditorEngine<S, D>
where
    S: AssignmentStore,
    D: DirectoryGroups,
{
    pub fn new(store: S, directory: D, editor_roles: Vec<String>) -> Self {
        EditorEngine { store, directory, editor_roles }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Adjusts `all_caps` for a single `requested` capability check.
    ///
    /// - `create_pages` is granted only to editor roles.
    /// - `edit_pages` is granted to everyone, so the pages list is reachable.
    /// - The per-page editing checks are granted to a directory-backed user
    ///   outside the editor roles when one of their groups is assigned to
    ///   `current_post`.
    pub fn grant_editor_capabilities(
        &self,
        mut all_caps: AllCaps,
        requested: &str,
        user: &User,
        current_post: Option<&Post>,
    ) -> AllCaps {
        let is_editor_role = user.has_any_role(&self.editor_roles);

        if requested == core::CREATE_PAGES {
            if is_editor_role {
                all_caps.insert(core::CREATE_PAGES.to_string(), true);
            }
            return all_caps;
        }

        if requested == core::EDIT_PAGES {
            all_caps.insert(core::EDIT_PAGES.to_string(), true);
            return all_caps;
        }

        if user.is_anonymous() || is_editor_role || !rights::is_editor_checked_cap(requested) {
            return all_caps;
        }

        let Some(post) = current_post else {
            return all_caps;
        };

        let assigned = match self.store.get(post.id, MetaKey::EditorGroups) {
            Ok(groups) => groups,
            Err(e) => {
                tracing::warn!(post_id = post.id, error = %e, "Failed to read editor groups");
                return all_caps;
            }
        };
        if assigned.is_empty() || !user.directory_account {
            return all_caps;
        }

        let user_groups = self.directory.groups_for(user);
        if assigned.is_disjoint(&user_groups) {
            return all_caps;
        }

        tracing::debug!(post_id = post.id, user_id = ?user.id, "Granting editor-group capabilities");
        for cap in core::EDITOR_GRANTED {
            all_caps.insert(cap.to_string(), true);
        }
        all_caps
    }
}

/// Reduces a directory distinguished name such as
/// `CN=Jane Doe,OU=Staff,DC=example` to the value of its first component.
pub fn clean_member(dn: &str) -> String {
    let first = dn.split(',').next().unwrap_or(dn);
    first.rsplit('=').next().unwrap_or(first).trim().to_string()
}

/// Picker record for a directory search hit, or `None` for a group the
/// directory reported without members.
///
/// Member DNs are reduced with [`clean_member`]; the group keeps its full DN
/// as id and shows its common name.
pub fn directory_group_details(group: DirectoryGroup) -> Option<GroupDetails> {
    let members = group.members?;
    let display_name = group.name.unwrap_or_else(|| group.dn.clone());
    Some(GroupDetails {
        id: group.dn,
        display_name: Some(display_name),
        member_count: Some(members.len() as u64),
        member_list: Some(members.iter().map(|m| clean_member(m)).collect()),
        selected: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_member() {
        assert_eq!(clean_member("CN=Jane Doe,OU=Staff,DC=example,DC=edu"), "Jane Doe");
        assert_eq!(clean_member("jdoe"), "jdoe");
        assert_eq!(clean_member(""), "");
    }

    #[test]
    fn test_directory_group_details() {
        let group = DirectoryGroup::new("CN=Web Editors,OU=Groups,DC=example")
            .named("Web Editors")
            .with_members(["CN=Jane Doe,OU=Staff,DC=example", "CN=Sam Roe,OU=Staff,DC=example"]);

        let details = directory_group_details(group).unwrap();
        assert_eq!(details.id, "CN=Web Editors,OU=Groups,DC=example");
        assert_eq!(details.display_name.as_deref(), Some("Web Editors"));
        assert_eq!(details.member_count, Some(2));
        assert_eq!(details.member_list, Some(vec!["Jane Doe".to_string(), "Sam Roe".to_string()]));
        assert!(!details.selected);
    }

    #[test]
    fn test_memberless_directory_group_is_skipped() {
        assert_eq!(directory_group_details(DirectoryGroup::new("CN=Empty,DC=example").named("Empty")), None);

        let unnamed = directory_group_details(DirectoryGroup::new("CN=Ops,DC=example").with_members(Vec::<String>::new()));
        assert_eq!(unnamed.unwrap().display_name.as_deref(), Some("CN=Ops,DC=example"));
    }
}
