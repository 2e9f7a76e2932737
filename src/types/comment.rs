//! Comments attached to a profile, optionally carrying a personality vote,
//! plus the listing filter/order types and the like-toggle result.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::{Record, RecordId};
use crate::personality::{Personality, PersonalityKind};

// ─────────────────────────────────────────────────────────────────
// Comment
// ─────────────────────────────────────────────────────────────────

/// A stored comment. Only the like set changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub profile_id: RecordId,
    pub user_id: RecordId,
    pub title: String,
    pub content: String,
    pub personality: Personality,
    /// Users who liked this comment. A set: no user appears twice.
    #[serde(default)]
    pub likes: IndexSet<RecordId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        profile_id: RecordId,
        user_id: RecordId,
        title: String,
        content: String,
        personality: Personality,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            profile_id,
            user_id,
            title,
            content,
            personality,
            likes: IndexSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn total_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn is_liked_by(&self, user_id: &RecordId) -> bool {
        self.likes.contains(user_id)
    }
}

impl Record for Comment {
    const ENTITY: &'static str = "Comment";

    fn id(&self) -> RecordId {
        self.id
    }
}

// ─────────────────────────────────────────────────────────────────
// Request bodies
// ─────────────────────────────────────────────────────────────────

/// Body of a comment creation request.
///
/// `personality` stays untyped here: the service must distinguish "not an
/// object" from "object with an invalid token" to report the right message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentDraft {
    pub profile_id: Option<String>,
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub personality: Option<serde_json::Value>,
}

/// Body of a like/unlike request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LikeRequest {
    pub comment_id: Option<String>,
    pub user_id: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Listing
// ─────────────────────────────────────────────────────────────────

/// Which comments a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentFilter {
    #[default]
    All,
    /// Only comments whose vote has a value on this axis.
    With(PersonalityKind),
}

impl CommentFilter {
    /// Parse the `personality` query parameter. Anything other than a known
    /// axis name lists every comment.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse::<PersonalityKind>().ok())
            .map(CommentFilter::With)
            .unwrap_or(CommentFilter::All)
    }

    pub fn matches(&self, comment: &Comment) -> bool {
        match self {
            CommentFilter::All => true,
            CommentFilter::With(kind) => comment.personality.has(*kind),
        }
    }
}

impl fmt::Display for CommentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentFilter::All => f.write_str("all"),
            CommentFilter::With(kind) => write!(f, "{}", kind),
        }
    }
}

/// Sort key for comment listings (always ascending).
///
/// The `orderBy` query parameter is untrusted, so only these fields are
/// sortable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentOrder {
    #[default]
    CreatedAt,
    Title,
}

impl CommentOrder {
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "createdAt" => Some(CommentOrder::CreatedAt),
            "title" => Some(CommentOrder::Title),
            _ => None,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            CommentOrder::CreatedAt => "createdAt",
            CommentOrder::Title => "title",
        }
    }

    pub fn compare(&self, a: &Comment, b: &Comment) -> Ordering {
        match self {
            CommentOrder::CreatedAt => a.created_at.cmp(&b.created_at),
            CommentOrder::Title => a.title.cmp(&b.title),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────

/// A comment as listed, annotated with its like count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub total_likes: usize,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        let total_likes = comment.total_likes();
        Self { comment, total_likes }
    }
}

/// Outcome of a like/unlike toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub comment: Comment,
    /// True when the toggle added the like, false when it removed it.
    pub liked: bool,
    pub total_likes: usize,
}
