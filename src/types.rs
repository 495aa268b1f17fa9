//!
//! Shared data types for posts, users and groups.
//!
//! These mirror the records the host content system owns. The crate only reads
//! them; nothing here is persisted by this crate directly.

use std::collections::BTreeSet;
use std::fmt;

use crate::rights::PostTypeCaps;

/// Identifier of a post. `0` is never a valid post.
pub type PostId = u64;

/// Identifier of a user account.
pub type UserId = u64;

/// Identifier of a viewer or editor group (e.g. `site-member`).
pub type GroupId = String;

/// Ordered-irrelevant, duplicate-free set of group identifiers.
/// A `BTreeSet` keeps iteration deterministic for callers and tests.
pub type GroupSet = BTreeSet<GroupId>;

/// Identifier of the one group recognised without any extension.
pub const SITE_MEMBER_GROUP: &str = "site-member";

/// Publication state of a post as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PostStatus {
    Publish,
    Private,
    /// Published, but behind a password.
    Password,
    Draft,
    Pending,
    Future,
    Trash,
    /// Any status registered by other host extensions.
    Other(String),
}

impl PostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PostStatus::Publish => "publish",
            PostStatus::Private => "private",
            PostStatus::Password => "password",
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Future => "future",
            PostStatus::Trash => "trash",
            PostStatus::Other(s) => s,
        }
    }
}

impl From<&str> for PostStatus {
    fn from(value: &str) -> Self {
        match value {
            "publish" => PostStatus::Publish,
            "private" => PostStatus::Private,
            "password" => PostStatus::Password,
            "draft" => PostStatus::Draft,
            "pending" => PostStatus::Pending,
            "future" => PostStatus::Future,
            "trash" => PostStatus::Trash,
            other => PostStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for PostStatus {
    fn from(value: String) -> Self {
        PostStatus::from(value.as_str())
    }
}

impl From<PostStatus> for String {
    fn from(value: PostStatus) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered post type and the capability names the host maps onto it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PostType {
    pub name: String,
    pub caps: PostTypeCaps,
}

impl PostType {
    /// The built-in `post` type.
    pub fn post() -> Self {
        PostType { name: "post".into(), caps: PostTypeCaps::for_plural("posts") }
    }

    /// The built-in `page` type.
    pub fn page() -> Self {
        PostType { name: "page".into(), caps: PostTypeCaps::for_plural("pages") }
    }
}

/// The subset of a post record the decision engines look at.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Post {
    pub id: PostId,
    pub status: PostStatus,
    /// Some imported content has no author on record.
    pub author: Option<UserId>,
    pub post_type: PostType,
}

impl Post {
    pub fn new(id: PostId, status: impl Into<PostStatus>, author: Option<UserId>, post_type: PostType) -> Self {
        Post { id, status: status.into(), author, post_type }
    }

    /// True only when both the post and the user carry an identity and they match.
    pub fn is_authored_by(&self, user: &User) -> bool {
        matches!((self.author, user.id), (Some(author), Some(id)) if author == id)
    }
}

/// The user a capability check is being evaluated for.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    /// `None` for anonymous visitors.
    pub id: Option<UserId>,
    /// Whether the user belongs to the site the post lives on.
    pub site_member: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Account provisioned from the institutional directory. Only such
    /// accounts take part in editor-group grants.
    #[serde(default)]
    pub directory_account: bool,
}

impl User {
    pub fn anonymous() -> Self {
        User::default()
    }

    pub fn member(id: UserId) -> Self {
        User { id: Some(id), site_member: true, ..User::default() }
    }

    pub fn non_member(id: UserId) -> Self {
        User { id: Some(id), site_member: false, ..User::default() }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_directory_account(mut self) -> Self {
        self.directory_account = true;
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.id.is_none()
    }

    pub fn has_any_role(&self, roles: &[String]) -> bool {
        self.roles.iter().any(|r| roles.contains(r))
    }
}

/// An endorsed group a post can be restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

impl Group {
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>) -> Self {
        Group { id: id.into(), name: name.into() }
    }

    /// The built-in "Site Members" group.
    pub fn site_member() -> Self {
        Group::new(SITE_MEMBER_GROUP, "Site Members")
    }
}

/// Group record returned to the admin UI by the get and search commands.
///
/// Search extensions may leave any of the optional fields empty; they are
/// omitted from the serialized record rather than sent as nulls.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GroupDetails {
    pub id: GroupId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_list: Option<Vec<String>>,
    /// Whether the group is currently assigned to the post.
    #[serde(default)]
    pub selected: bool,
}

impl GroupDetails {
    /// Basic record for an assigned group before any extension enriches it.
    pub fn basic(id: impl Into<GroupId>) -> Self {
        let id = id.into();
        GroupDetails { display_name: Some(id.clone()), id, ..GroupDetails::default() }
    }
}

/// A group as the institutional directory reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DirectoryGroup {
    /// Distinguished name; the id editor assignments store.
    pub dn: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Member DNs. `None` when the directory returned no member attribute.
    #[serde(default)]
    pub members: Option<Vec<String>>,
}

impl DirectoryGroup {
    pub fn new(dn: impl Into<String>) -> Self {
        DirectoryGroup { dn: dn.into(), ..DirectoryGroup::default() }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = Some(members.into_iter().map(Into::into).collect());
        self
    }
}
