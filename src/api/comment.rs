use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::response::{json_body, query_params, Reply};
use super::AppState;
use crate::error::Result;
use crate::types::{Comment, CommentDraft, CommentView, LikeRequest, LikeToggle};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentQuery {
    pub personality: Option<String>,
    pub order_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentList {
    pub comments: Vec<CommentView>,
    pub count: usize,
}

pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CommentDraft>, JsonRejection>,
) -> Result<Reply<Comment>> {
    let comment = state.services.comments.create(json_body(payload)?).await?;
    Ok(Reply::created(comment))
}

pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<CommentQuery>, QueryRejection>,
) -> Result<Reply<CommentList>> {
    let query = query_params(query)?;
    let comments = state
        .services
        .comments
        .list(query.personality.as_deref(), query.order_by.as_deref())
        .await?;
    let count = comments.len();
    Ok(Reply::ok(CommentList { comments, count }))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LikeRequest>, JsonRejection>,
) -> Result<Reply<LikeToggle>> {
    let toggle = state.services.comments.toggle_like(json_body(payload)?).await?;
    Ok(Reply::ok(toggle))
}
