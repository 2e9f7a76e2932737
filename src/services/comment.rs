//! Comment creation, listing, and the like toggle.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::personality::{
    is_valid_enneagram_wing, is_valid_mbti, is_valid_zodiac, Personality, PersonalityKind,
};
use crate::store::EntityStore;
use crate::types::{
    Comment, CommentDraft, CommentFilter, CommentOrder, CommentView, LikeRequest, LikeToggle,
    Record, RecordId,
};

const FIELDS_REQUIRED: &str = "all fields are required";
const PERSONALITY_NOT_OBJECT: &str = "Personality must be an object";
const LIKE_IDS_REQUIRED: &str = "commentId and userId are required";

#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn EntityStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new comment with an empty like set.
    ///
    /// Referenced profile and user are not checked for existence.
    pub async fn create(&self, draft: CommentDraft) -> Result<Comment> {
        let (Some(profile_id), Some(user_id), Some(title), Some(content), Some(personality)) = (
            non_empty(draft.profile_id),
            non_empty(draft.user_id),
            non_empty(draft.title),
            non_empty(draft.content),
            draft.personality.filter(is_truthy),
        ) else {
            return Err(Error::validation(FIELDS_REQUIRED));
        };

        let Value::Object(fields) = personality else {
            return Err(Error::validation(PERSONALITY_NOT_OBJECT));
        };
        let personality = parse_personality(&fields)?;

        let profile_id = RecordId::parse(&profile_id)?;
        let user_id = RecordId::parse(&user_id)?;

        let comment = self
            .store
            .insert_comment(Comment::new(profile_id, user_id, title, content, personality))
            .await?;
        info!(id = %comment.id, profile = %profile_id, "Comment created");
        Ok(comment)
    }

    /// Comments matching the `personality` query value, sorted ascending by
    /// `order_by`. Unknown filter values list everything; unknown sort
    /// fields fall back to creation time.
    pub async fn list(&self, personality: Option<&str>, order_by: Option<&str>) -> Result<Vec<CommentView>> {
        let filter = CommentFilter::from_query(personality);
        let order = match order_by {
            None => CommentOrder::default(),
            Some(field) => CommentOrder::from_field(field).unwrap_or_else(|| {
                warn!(field, "Unsupported comment sort field, using createdAt");
                CommentOrder::default()
            }),
        };
        debug!(%filter, order = order.field(), "Listing comments");

        let comments = self.store.list_comments(filter, order).await?;
        Ok(comments.into_iter().map(CommentView::from).collect())
    }

    /// Like the comment if `user_id` has not liked it yet, otherwise unlike.
    ///
    /// The decision comes from a read before the store's atomic set update,
    /// so two concurrent toggles by the same user may both take the same
    /// branch. Toggles by different users never lose each other's update.
    pub async fn toggle_like(&self, request: LikeRequest) -> Result<LikeToggle> {
        let (Some(comment_id), Some(user_id)) = (non_empty(request.comment_id), non_empty(request.user_id))
        else {
            return Err(Error::validation(LIKE_IDS_REQUIRED));
        };
        let comment_id = RecordId::parse(&comment_id)?;
        let user_id = RecordId::parse(&user_id)?;

        let current = self
            .store
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| Error::not_found(Comment::ENTITY))?;
        let already_liked = current.is_liked_by(&user_id);

        let updated = if already_liked {
            self.store.remove_like(comment_id, user_id).await?
        } else {
            self.store.add_like(comment_id, user_id).await?
        };
        let updated = updated.ok_or_else(|| Error::not_found(Comment::ENTITY))?;

        let total_likes = updated.total_likes();
        debug!(comment = %comment_id, user = %user_id, liked = !already_liked, total_likes, "Like toggled");
        Ok(LikeToggle {
            comment: updated,
            liked: !already_liked,
            total_likes,
        })
    }
}

// ─────────────────────────────────────────────────────────────────
// Request helpers
// ─────────────────────────────────────────────────────────────────

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Loose JSON truthiness: null, false, zero, and "" are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn parse_personality(fields: &Map<String, Value>) -> Result<Personality> {
    Ok(Personality {
        mbti: vote(fields, PersonalityKind::Mbti, is_valid_mbti, "Invalid MBTI type in personality")?,
        zodiac: vote(fields, PersonalityKind::Zodiac, is_valid_zodiac, "Invalid Zodiac sign in personality")?,
        enneagram: vote(
            fields,
            PersonalityKind::Enneagram,
            is_valid_enneagram_wing,
            "Invalid Enneagram type in personality",
        )?,
    })
}

/// One axis of a personality vote. Falsy values count as absent; anything
/// else must be a string accepted by `valid`.
fn vote<T: std::str::FromStr>(
    fields: &Map<String, Value>,
    kind: PersonalityKind,
    valid: fn(&str) -> bool,
    invalid: &'static str,
) -> Result<Option<T>> {
    match fields.get(kind.key()) {
        Some(value) if is_truthy(value) => value
            .as_str()
            .filter(|token| valid(token))
            .and_then(|token| token.parse().ok())
            .map(Some)
            .ok_or_else(|| Error::validation(invalid)),
        _ => Ok(None),
    }
}
