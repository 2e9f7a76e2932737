use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use super::response::{json_body, Reply};
use super::AppState;
use crate::error::Result;
use crate::types::{Deleted, User, UserDraft, UserPatch};

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub count: usize,
}

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<UserDraft>, JsonRejection>,
) -> Result<Reply<User>> {
    let user = state.services.users.create(json_body(payload)?).await?;
    Ok(Reply::created(user))
}

pub async fn list(State(state): State<AppState>) -> Result<Reply<UserList>> {
    let users = state.services.users.list().await?;
    let count = users.len();
    Ok(Reply::ok(UserList { users, count }))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Reply<User>> {
    Ok(Reply::ok(state.services.users.get(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<UserPatch>, JsonRejection>,
) -> Result<Reply<User>> {
    let patch = json_body(payload)?;
    Ok(Reply::ok(state.services.users.update(&id, patch).await?))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Reply<Deleted>> {
    Ok(Reply::ok(state.services.users.delete(&id).await?))
}
