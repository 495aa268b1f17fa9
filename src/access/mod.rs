//! Access-control related modules (capability lists, capability names).

pub mod capability;

pub use capability::*;
// Also expose the capability names under a shorter path.
pub use crate::rights as rights;
