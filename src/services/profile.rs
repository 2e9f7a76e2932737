//! Profile CRUD.

use std::sync::Arc;

use tracing::{debug, info};

use super::AvatarUrl;
use crate::error::{Error, Result};
use crate::store::EntityStore;
use crate::types::{Deleted, Profile, ProfileDraft, ProfilePatch, Record, RecordId};

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn EntityStore>,
    avatars: AvatarUrl,
}

impl ProfileService {
    pub fn new(store: Arc<dyn EntityStore>, avatars: AvatarUrl) -> Self {
        Self { store, avatars }
    }

    /// Persist a new profile. Fails if `name` is missing or blank.
    pub async fn create(&self, draft: ProfileDraft) -> Result<Profile> {
        let name = draft.required_name()?;
        let image = self.avatars.resolve(draft.image.as_deref(), &name);
        let profile = self.store.insert_profile(draft.into_profile(name, image)).await?;
        info!(id = %profile.id, name = %profile.name, "Profile created");
        Ok(profile)
    }

    pub async fn list(&self) -> Result<Vec<Profile>> {
        self.store.list_profiles().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<Profile> {
        let id = RecordId::parse(raw_id)?;
        self.store
            .find_profile(id)
            .await?
            .ok_or_else(|| Error::not_found(Profile::ENTITY))
    }

    /// The first stored profile, if any.
    pub async fn first(&self) -> Result<Option<Profile>> {
        self.store.first_profile().await
    }

    pub async fn update(&self, raw_id: &str, patch: ProfilePatch) -> Result<Profile> {
        let id = RecordId::parse(raw_id)?;
        if self.store.find_profile(id).await?.is_none() {
            return Err(Error::not_found(Profile::ENTITY));
        }
        patch.validate()?;
        if patch.is_empty() {
            debug!(%id, "Empty profile patch");
        }
        let profile = self
            .store
            .update_profile(id, &patch)
            .await?
            .ok_or_else(|| Error::not_found(Profile::ENTITY))?;
        info!(%id, "Profile updated");
        Ok(profile)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<Deleted> {
        let id = RecordId::parse(raw_id)?;
        if !self.store.delete_profile(id).await? {
            return Err(Error::not_found(Profile::ENTITY));
        }
        info!(%id, "Profile deleted");
        Ok(Deleted::of::<Profile>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::store::MemoryStore;

    fn service() -> ProfileService {
        ProfileService::new(Arc::new(MemoryStore::new()), AvatarUrl::default())
    }

    fn draft(name: &str) -> ProfileDraft {
        ProfileDraft {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_defaults_image_to_avatar() {
        let profile = service().create(draft("Jane Doe")).await.unwrap();
        assert_eq!(profile.image, "https://ui-avatars.com/api/?name=Jane%20Doe");
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let err = service().create(ProfileDraft::default()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Validation);
        assert_eq!(err.to_string(), "Name is required");
    }

    #[tokio::test]
    async fn test_get_id_validation() {
        let svc = service();
        assert_eq!(svc.get("undefined").await.unwrap_err().code(), ErrorCode::InvalidId);
        assert_eq!(svc.get("null").await.unwrap_err().code(), ErrorCode::InvalidId);
        assert_eq!(svc.get("not-an-id").await.unwrap_err().code(), ErrorCode::InvalidId);

        let missing = svc.get(&RecordId::new().to_string()).await.unwrap_err();
        assert_eq!(missing.to_string(), "Profile not found");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let svc = service();
        let created = svc.create(draft("Jane")).await.unwrap();
        let id = created.id.to_string();

        let patch: ProfilePatch = serde_json::from_str(r#"{"name": "Janet"}"#).unwrap();
        let updated = svc.update(&id, patch).await.unwrap();
        assert_eq!(updated.name, "Janet");
        assert_eq!(updated.image, created.image);

        let blank: ProfilePatch = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert_eq!(svc.update(&id, blank).await.unwrap_err().code(), ErrorCode::Validation);

        let deleted = svc.delete(&id).await.unwrap();
        assert_eq!(deleted.message, "Profile deleted successfully");
        assert_eq!(svc.delete(&id).await.unwrap_err().code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_update_missing_profile_is_not_found_before_validation() {
        let blank: ProfilePatch = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        let err = service().update(&RecordId::new().to_string(), blank).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.to_string(), "Profile not found");
    }
}
