//! Core record types: identities, profiles, users, comments, and the patch
//! values used for partial updates.

pub mod comment;
pub mod id;
pub mod patch;
pub mod profile;
pub mod user;

use serde::Serialize;

pub use comment::{Comment, CommentDraft, CommentFilter, CommentOrder, CommentView, LikeRequest, LikeToggle};
pub use id::RecordId;
pub use patch::Patch;
pub use profile::{Profile, ProfileDraft, ProfilePatch};
pub use user::{User, UserDraft, UserPatch};

/// A record persisted by the entity store under a store-assigned identity.
pub trait Record: Clone + Send + Sync + 'static {
    /// Entity name used in messages ("Profile", "User", "Comment").
    const ENTITY: &'static str;

    fn id(&self) -> RecordId;
}

/// Confirmation returned by delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deleted {
    pub message: String,
}

impl Deleted {
    pub fn of<R: Record>() -> Self {
        Self {
            message: format!("{} deleted successfully", R::ENTITY),
        }
    }
}

/// Trim a client-supplied string the way every profile/user write does.
pub(crate) fn clean(value: &str) -> String {
    value.trim().to_string()
}
