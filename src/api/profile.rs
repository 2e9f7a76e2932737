use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::response::{json_body, Reply};
use super::AppState;
use crate::error::Result;
use crate::types::{Deleted, Profile, ProfileDraft, ProfilePatch};

#[derive(Debug, Serialize)]
pub struct ProfileList {
    pub profiles: Vec<Profile>,
    pub count: usize,
}

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProfileDraft>, JsonRejection>,
) -> Result<Reply<Profile>> {
    let draft = json_body(payload)?;
    let profile = state.services.profiles.create(draft).await?;
    Ok(Reply::created(profile))
}

pub async fn list(State(state): State<AppState>) -> Result<Reply<ProfileList>> {
    let profiles = state.services.profiles.list().await?;
    let count = profiles.len();
    Ok(Reply::ok(ProfileList { profiles, count }))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Reply<Profile>> {
    Ok(Reply::ok(state.services.profiles.get(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProfilePatch>, JsonRejection>,
) -> Result<Reply<Profile>> {
    let patch = json_body(payload)?;
    Ok(Reply::ok(state.services.profiles.update(&id, patch).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Reply<Deleted>> {
    Ok(Reply::ok(state.services.profiles.delete(&id).await?))
}
