//! Entity store - persistence for profiles, users, and comments.
//!
//! Services never hold records across requests; every read and write goes
//! through an [`EntityStore`] handle that is constructed once at startup and
//! shared behind an `Arc`.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Comment, CommentFilter, CommentOrder, Profile, ProfilePatch, RecordId, User, UserPatch,
};

/// Persistence seam for all three record kinds.
///
/// Updates return `Ok(None)` when the id does not exist. Implementations must
/// make [`add_like`](EntityStore::add_like) and
/// [`remove_like`](EntityStore::remove_like) single atomic set operations on
/// the stored record: two concurrent calls for different users must both be
/// reflected in the final like set.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    // ─────────────────────────────────────────────────────────────
    // Profiles
    // ─────────────────────────────────────────────────────────────

    async fn insert_profile(&self, profile: Profile) -> Result<Profile>;

    /// All profiles in store-native order.
    async fn list_profiles(&self) -> Result<Vec<Profile>>;

    async fn find_profile(&self, id: RecordId) -> Result<Option<Profile>>;

    /// The first profile in store-native order.
    async fn first_profile(&self) -> Result<Option<Profile>>;

    async fn update_profile(&self, id: RecordId, patch: &ProfilePatch) -> Result<Option<Profile>>;

    /// Returns whether a record was removed.
    async fn delete_profile(&self, id: RecordId) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────

    async fn insert_user(&self, user: User) -> Result<User>;

    async fn list_users(&self) -> Result<Vec<User>>;

    async fn find_user(&self, id: RecordId) -> Result<Option<User>>;

    async fn update_user(&self, id: RecordId, patch: &UserPatch) -> Result<Option<User>>;

    async fn delete_user(&self, id: RecordId) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────
    // Comments
    // ─────────────────────────────────────────────────────────────

    async fn insert_comment(&self, comment: Comment) -> Result<Comment>;

    /// Comments passing `filter`, sorted ascending by `order`. Ties keep
    /// store-native order.
    async fn list_comments(&self, filter: CommentFilter, order: CommentOrder) -> Result<Vec<Comment>>;

    async fn find_comment(&self, id: RecordId) -> Result<Option<Comment>>;

    /// Atomically insert `user_id` into the comment's like set. Re-adding an
    /// existing member is a no-op.
    async fn add_like(&self, comment_id: RecordId, user_id: RecordId) -> Result<Option<Comment>>;

    /// Atomically remove `user_id` from the comment's like set.
    async fn remove_like(&self, comment_id: RecordId, user_id: RecordId) -> Result<Option<Comment>>;

    // ─────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Release the store. Later calls fail.
    async fn close(&self) -> Result<()>;
}
