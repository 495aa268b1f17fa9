//!
//! Read-capability decision engine.
//!
//! Given a post, the meta capability being checked, the user and the primitive
//! capabilities the host has mapped so far, decide whether viewer-group
//! membership should let the user read the post as if it were public.
//!
//! The engine never fails. Every ambiguous or missing input resolves to
//! "leave the host's capabilities alone", which for a private post means the
//! host's own (more restrictive) rules apply.

use crate::access::CapabilitySet;
use crate::config::VisibilityConfig;
use crate::engine::oracle::MembershipOracle;
use crate::rights;
use crate::store::{AssignmentStore, MetaKey};
use crate::types::{GroupId, GroupSet, Post, PostStatus, User};

/// Outcome of evaluating viewer-group access for one (post, user) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No post, or the post is not in the restricted status.
    NotRestricted,
    /// The user wrote the post and keeps the host's defaults.
    Author,
    /// No viewer groups are assigned (or they could not be read).
    Unassigned,
    /// Groups are assigned but the user has no identity to test.
    Anonymous,
    /// The oracle said the user is not in any assigned group.
    Denied,
    /// The oracle said the user is in at least one assigned group.
    Granted,
}

/// The viewer-group decision engine.
#[derive(Debug, Clone)]
pub struct VisibilityEngine<S: AssignmentStore, O: MembershipOracle> {
    store: S,
    oracle: O,
    restricted_status: PostStatus,
    site_member_group: GroupId,
}

impl<S, O> VisibilityEngine<S, O>
where
    S: AssignmentStore,
    O: MembershipOracle,
{
    pub fn new(store: S, oracle: O, config: &VisibilityConfig) -> Self {
        VisibilityEngine {
            store,
            oracle,
            restricted_status: config.restricted_status.clone(),
            site_member_group: config.site_member_group.id.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Reads the viewer assignment, treating a store failure as "none".
    fn viewer_groups(&self, post: &Post) -> GroupSet {
        match self.store.get(post.id, MetaKey::ViewerGroups) {
            Ok(groups) => groups,
            Err(e) => {
                tracing::warn!(post_id = post.id, error = %e, "Failed to read viewer groups; deferring to host");
                GroupSet::new()
            }
        }
    }

    /// Decides whether `user` may read `post` through viewer-group membership.
    pub fn verdict(&self, post: Option<&Post>, user: &User) -> Verdict {
        let post = match post {
            Some(p) if p.status == self.restricted_status => p,
            _ => return Verdict::NotRestricted,
        };

        if post.is_authored_by(user) {
            return Verdict::Author;
        }

        let groups = self.viewer_groups(post);
        if groups.is_empty() {
            return Verdict::Unassigned;
        }

        let user_id = match user.id {
            Some(id) => id,
            None => return Verdict::Anonymous,
        };

        let built_in = groups.contains(&self.site_member_group) && user.site_member;
        let member = self.oracle.is_member(built_in, user_id, &groups);
        tracing::debug!(post_id = post.id, user_id, built_in, member, "Evaluated viewer group membership");

        if member {
            Verdict::Granted
        } else {
            Verdict::Denied
        }
    }

    /// resolve_read_capability(post, cap, user, caps) → caps
    ///
    /// Acts only on `read_post`/`read_page` checks the host has not already
    /// decided. On a grant, every `read_private_*` entry for the post type is
    /// removed and exactly one `read` entry is appended; all other entries keep
    /// their position and value. A `read` entry already in the list is folded
    /// into the appended one, which keeps the first such entry's value.
    pub fn resolve_read_capability(
        &self,
        post: Option<&Post>,
        requested: &str,
        user: &User,
        mut caps: CapabilitySet,
    ) -> CapabilitySet {
        if !rights::is_read_meta_cap(requested) || caps.contains(requested) {
            return caps;
        }

        if self.verdict(post, user) != Verdict::Granted {
            return caps;
        }

        // Granted implies a post was present.
        let Some(post) = post else { return caps };
        let type_caps = &post.post_type.caps;

        let read_granted = caps.granted(&type_caps.read).unwrap_or(true);
        let removed = caps.remove_all(&type_caps.read_private_posts);
        caps.remove_all(&type_caps.read);
        caps.push_entry(type_caps.read.clone(), read_granted);

        tracing::debug!(
            post_id = post.id,
            removed,
            read_cap = %type_caps.read,
            read_granted,
            "Granted viewer-group read access"
        );
        caps
    }
}
