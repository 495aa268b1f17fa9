pub mod core;
pub mod editors;
pub mod oracle;


// Re-export the primary types so `crate::engine::*` paths stay short.
pub use self::core::{Verdict, VisibilityEngine};
pub use self::editors::{clean_member, directory_group_details, DirectoryGroups, EditorEngine, NoDirectory};
pub use self::oracle::{DefaultOracle, MembershipOracle};
