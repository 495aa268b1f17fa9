//! Membership oracle abstraction.
//!
//! The engine computes a built-in membership answer (only the site-member group
//! is understood natively) and then hands it to a `MembershipOracle`, which may
//! override it in either direction. External group systems plug in here.

use crate::types::{GroupSet, UserId};

/// Pluggable predicate answering "is this user in one of these groups?".
///
/// `default` is the engine's built-in answer. The returned value is final.
/// Implementations must be deterministic for a given input and must not panic.
pub trait MembershipOracle {
    fn is_member(&self, default: bool, user_id: UserId, groups: &GroupSet) -> bool;
}

/// Oracle that accepts the built-in answer unchanged.
#[derive(Default, Debug, Clone, Copy)]
pub struct DefaultOracle;

impl MembershipOracle for DefaultOracle {
    fn is_member(&self, default: bool, _user_id: UserId, _groups: &GroupSet) -> bool {
        default
    }
}

impl<F> MembershipOracle for F
where
    F: Fn(bool, UserId, &GroupSet) -> bool,
{
    fn is_member(&self, default: bool, user_id: UserId, groups: &GroupSet) -> bool {
        self(default, user_id, groups)
    }
}
