//! In-process entity store.
//!
//! Each record kind lives in an insertion-ordered map behind its own
//! `RwLock`. Every mutation (patch, like add/remove, delete) happens under a
//! single write-lock acquisition, so no caller ever observes or overwrites a
//! half-applied change.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, info};

use super::EntityStore;
use crate::error::{Error, Result};
use crate::types::{
    Comment, CommentFilter, CommentOrder, Profile, ProfilePatch, Record, RecordId, User, UserPatch,
};

// ─────────────────────────────────────────────────────────────────
// Collection
// ─────────────────────────────────────────────────────────────────

/// Thread-safe, insertion-ordered collection of one record kind
struct Collection<T: Record> {
    records: RwLock<IndexMap<RecordId, T>>,
}

impl<T: Record> Collection<T> {
    fn new() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
        }
    }

    fn insert(&self, record: T) -> Result<T> {
        let mut records = self.records.write();
        let id = record.id();
        if records.contains_key(&id) {
            return Err(Error::DuplicateKey { id: id.to_string() });
        }
        records.insert(id, record.clone());
        Ok(record)
    }

    fn all(&self) -> Vec<T> {
        self.records.read().values().cloned().collect()
    }

    fn get(&self, id: &RecordId) -> Option<T> {
        self.records.read().get(id).cloned()
    }

    fn first(&self) -> Option<T> {
        self.records.read().first().map(|(_, record)| record.clone())
    }

    /// Mutate one record in place under the write lock and return the result
    fn modify(&self, id: &RecordId, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut records = self.records.write();
        let record = records.get_mut(id)?;
        f(record);
        Some(record.clone())
    }

    fn remove(&self, id: &RecordId) -> bool {
        self.records.write().shift_remove(id).is_some()
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}

// ─────────────────────────────────────────────────────────────────
// Memory Store
// ─────────────────────────────────────────────────────────────────

/// Entity store held entirely in process memory
pub struct MemoryStore {
    profiles: Collection<Profile>,
    users: Collection<User>,
    comments: Collection<Comment>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            profiles: Collection::new(),
            users: Collection::new(),
            comments: Collection::new(),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::StoreClosed);
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn insert_profile(&self, profile: Profile) -> Result<Profile> {
        self.ensure_open()?;
        self.profiles.insert(profile)
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.ensure_open()?;
        Ok(self.profiles.all())
    }

    async fn find_profile(&self, id: RecordId) -> Result<Option<Profile>> {
        self.ensure_open()?;
        Ok(self.profiles.get(&id))
    }

    async fn first_profile(&self) -> Result<Option<Profile>> {
        self.ensure_open()?;
        Ok(self.profiles.first())
    }

    async fn update_profile(&self, id: RecordId, patch: &ProfilePatch) -> Result<Option<Profile>> {
        self.ensure_open()?;
        Ok(self.profiles.modify(&id, |profile| {
            patch.apply(profile);
            profile.updated_at = Utc::now();
        }))
    }

    async fn delete_profile(&self, id: RecordId) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.profiles.remove(&id))
    }

    async fn insert_user(&self, user: User) -> Result<User> {
        self.ensure_open()?;
        self.users.insert(user)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.ensure_open()?;
        Ok(self.users.all())
    }

    async fn find_user(&self, id: RecordId) -> Result<Option<User>> {
        self.ensure_open()?;
        Ok(self.users.get(&id))
    }

    async fn update_user(&self, id: RecordId, patch: &UserPatch) -> Result<Option<User>> {
        self.ensure_open()?;
        Ok(self.users.modify(&id, |user| {
            patch.apply(user);
            user.updated_at = Utc::now();
        }))
    }

    async fn delete_user(&self, id: RecordId) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.users.remove(&id))
    }

    async fn insert_comment(&self, comment: Comment) -> Result<Comment> {
        self.ensure_open()?;
        self.comments.insert(comment)
    }

    async fn list_comments(&self, filter: CommentFilter, order: CommentOrder) -> Result<Vec<Comment>> {
        self.ensure_open()?;
        let mut comments: Vec<Comment> = self
            .comments
            .all()
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect();
        // Stable: equal keys keep insertion order
        comments.sort_by(|a, b| order.compare(a, b));
        Ok(comments)
    }

    async fn find_comment(&self, id: RecordId) -> Result<Option<Comment>> {
        self.ensure_open()?;
        Ok(self.comments.get(&id))
    }

    async fn add_like(&self, comment_id: RecordId, user_id: RecordId) -> Result<Option<Comment>> {
        self.ensure_open()?;
        Ok(self.comments.modify(&comment_id, |comment| {
            if comment.likes.insert(user_id) {
                comment.updated_at = Utc::now();
            }
        }))
    }

    async fn remove_like(&self, comment_id: RecordId, user_id: RecordId) -> Result<Option<Comment>> {
        self.ensure_open()?;
        Ok(self.comments.modify(&comment_id, |comment| {
            if comment.likes.shift_remove(&user_id) {
                comment.updated_at = Utc::now();
            }
        }))
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            debug!("Memory store already closed");
            return Ok(());
        }
        info!(
            profiles = self.profiles.len(),
            users = self.users.len(),
            comments = self.comments.len(),
            "Memory store closed"
        );
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::ErrorCode;
    use crate::personality::{Mbti, Personality, ZodiacSign};
    use crate::types::{ProfileDraft, User};

    fn profile(name: &str) -> Profile {
        let draft = ProfileDraft {
            name: Some(name.to_string()),
            ..Default::default()
        };
        draft.into_profile(name.to_string(), String::new())
    }

    fn comment(title: &str, personality: Personality) -> Comment {
        Comment::new(
            RecordId::new(),
            RecordId::new(),
            title.to_string(),
            "content".to_string(),
            personality,
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStore::new();
        let p = store.insert_profile(profile("Jane")).await.unwrap();

        let found = store.find_profile(p.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Jane");
        assert!(store.find_profile(RecordId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected() {
        let store = MemoryStore::new();
        let user = User::new("Test".into(), String::new());
        store.insert_user(user.clone()).await.unwrap();

        let err = store.insert_user(user).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateKey);
    }

    #[tokio::test]
    async fn test_list_and_first_keep_insertion_order() {
        let store = MemoryStore::new();
        for name in ["Profile 1", "Profile 2", "Profile 3"] {
            store.insert_profile(profile(name)).await.unwrap();
        }

        let names: Vec<String> = store
            .list_profiles()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Profile 1", "Profile 2", "Profile 3"]);
        assert_eq!(store.first_profile().await.unwrap().unwrap().name, "Profile 1");
    }

    #[tokio::test]
    async fn test_update_applies_patch_and_bumps_timestamp() {
        let store = MemoryStore::new();
        let p = store.insert_profile(profile("Jane")).await.unwrap();
        let patch: ProfilePatch = serde_json::from_str(r#"{"mbti": "ENTP"}"#).unwrap();

        let updated = store.update_profile(p.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.mbti, "ENTP");
        assert_eq!(updated.name, "Jane");
        assert!(updated.updated_at >= p.updated_at);

        let missing = store.update_profile(RecordId::new(), &patch).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryStore::new();
        let p = store.insert_profile(profile("Jane")).await.unwrap();
        assert!(store.delete_profile(p.id).await.unwrap());
        assert!(!store.delete_profile(p.id).await.unwrap());
        assert!(store.list_profiles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_comments_filters_and_sorts() {
        let store = MemoryStore::new();
        store
            .insert_comment(comment("b", Personality { mbti: Some(Mbti::Intj), ..Default::default() }))
            .await
            .unwrap();
        store
            .insert_comment(comment("a", Personality { zodiac: Some(ZodiacSign::Leo), ..Default::default() }))
            .await
            .unwrap();
        store
            .insert_comment(comment("c", Personality { mbti: Some(Mbti::Enfp), ..Default::default() }))
            .await
            .unwrap();

        let by_title = store
            .list_comments(CommentFilter::All, CommentOrder::Title)
            .await
            .unwrap();
        let titles: Vec<&str> = by_title.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);

        let mbti_only = store
            .list_comments(
                CommentFilter::With(crate::personality::PersonalityKind::Mbti),
                CommentOrder::CreatedAt,
            )
            .await
            .unwrap();
        let titles: Vec<&str> = mbti_only.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["b", "c"]);
    }

    #[tokio::test]
    async fn test_like_set_semantics() {
        let store = MemoryStore::new();
        let c = store.insert_comment(comment("t", Personality::default())).await.unwrap();
        let user = RecordId::new();

        let once = store.add_like(c.id, user).await.unwrap().unwrap();
        let twice = store.add_like(c.id, user).await.unwrap().unwrap();
        assert_eq!(once.total_likes(), 1);
        assert_eq!(twice.total_likes(), 1);

        let removed = store.remove_like(c.id, user).await.unwrap().unwrap();
        assert_eq!(removed.total_likes(), 0);
        let removed_again = store.remove_like(c.id, user).await.unwrap().unwrap();
        assert_eq!(removed_again.total_likes(), 0);

        assert!(store.add_like(RecordId::new(), user).await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_likes_from_different_users_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        let c = store.insert_comment(comment("t", Personality::default())).await.unwrap();

        let handles: Vec<_> = (0..64)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add_like(c.id, RecordId::new()).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = store.find_comment(c.id).await.unwrap().unwrap();
        assert_eq!(stored.total_likes(), 64);
    }

    #[tokio::test]
    async fn test_closed_store_rejects_calls() {
        let store = MemoryStore::new();
        store.close().await.unwrap();
        store.close().await.unwrap();

        let err = store.list_profiles().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StoreClosed);
    }
}
