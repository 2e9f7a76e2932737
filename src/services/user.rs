//! User CRUD. Same contract shape as profiles, restricted to name and image.

use std::sync::Arc;

use tracing::info;

use super::AvatarUrl;
use crate::error::{Error, Result};
use crate::store::EntityStore;
use crate::types::{Deleted, Record, RecordId, User, UserDraft, UserPatch};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn EntityStore>,
    avatars: AvatarUrl,
}

impl UserService {
    pub fn new(store: Arc<dyn EntityStore>, avatars: AvatarUrl) -> Self {
        Self { store, avatars }
    }

    pub async fn create(&self, draft: UserDraft) -> Result<User> {
        let name = draft.required_name()?;
        let image = self.avatars.resolve(draft.image.as_deref(), &name);
        let user = self.store.insert_user(User::new(name, image)).await?;
        info!(id = %user.id, "User created");
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<User> {
        let id = RecordId::parse(raw_id)?;
        self.store
            .find_user(id)
            .await?
            .ok_or_else(|| Error::not_found(User::ENTITY))
    }

    pub async fn update(&self, raw_id: &str, patch: UserPatch) -> Result<User> {
        let id = RecordId::parse(raw_id)?;
        if self.store.find_user(id).await?.is_none() {
            return Err(Error::not_found(User::ENTITY));
        }
        patch.validate()?;
        self.store
            .update_user(id, &patch)
            .await?
            .ok_or_else(|| Error::not_found(User::ENTITY))
    }

    pub async fn delete(&self, raw_id: &str) -> Result<Deleted> {
        let id = RecordId::parse(raw_id)?;
        if !self.store.delete_user(id).await? {
            return Err(Error::not_found(User::ENTITY));
        }
        info!(%id, "User deleted");
        Ok(Deleted::of::<User>())
    }
}
