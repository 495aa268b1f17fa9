#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Content-Visibility restricts who may read private posts.
//!
//! A private post can be assigned one or more viewer groups. When a
//! capability check asks whether a user may read such a post, the
//! [`engine::VisibilityEngine`] consults a pluggable membership oracle and, if
//! the user belongs to an assigned group, rewrites the host's capability list
//! so the post reads like a public one. The [`service::ContentVisibility`]
//! service adds the commands an admin UI uses to list, save and search groups.

// Module for shared data types (posts, users, groups).
pub mod types;

// Module for capability names and post type mappings.
pub mod rights;

// Module for capability lists.
pub mod access;

// Module for error types.
pub mod error;

// Module for service configuration.
pub mod config;

// Module for assignment persistence.
pub mod store;

// Module for the endorsed group registry.
pub mod registry;

// Module for the decision engines.
pub mod engine;

// Module for group search and its cache.
pub mod search;

// Module for the command service.
pub mod service;

#[cfg(feature = "tracing-subscriber")]
pub mod telemetry;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use access::{AllCaps, CapabilitySet};
pub use config::VisibilityConfig;
pub use engine::{DefaultOracle, MembershipOracle, VisibilityEngine};
pub use error::VisibilityError;
pub use registry::{GroupRegistry, StaticGroupRegistry};
pub use service::ContentVisibility;
pub use store::{AssignmentStore, InMemoryAssignmentStore, MetaKey};
pub use types::{DirectoryGroup, Group, GroupDetails, GroupId, GroupSet, Post, PostId, PostStatus, PostType, User, UserId};
