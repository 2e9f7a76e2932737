//! User records - the people who browse profiles and leave comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::NAME_REQUIRED;
use super::{clean, Patch, Record, RecordId};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A new record with a fresh identity. `name` and `image` must already
    /// be trimmed and resolved.
    pub fn new(name: String, image: String) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            name,
            image,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for User {
    const ENTITY: &'static str = "User";

    fn id(&self) -> RecordId {
        self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserDraft {
    pub name: Option<String>,
    pub image: Option<String>,
}

impl UserDraft {
    pub fn required_name(&self) -> Result<String> {
        self.name
            .as_deref()
            .map(clean)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::validation(NAME_REQUIRED))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserPatch {
    pub name: Patch<String>,
    pub image: Patch<String>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Patch::Missing => Ok(()),
            Patch::Value(name) if !name.trim().is_empty() => Ok(()),
            _ => Err(Error::validation(NAME_REQUIRED)),
        }
    }

    pub fn apply(&self, user: &mut User) {
        self.name.clone().map(|v| clean(&v)).apply_to(&mut user.name);
        self.image.clone().map(|v| clean(&v)).apply_to(&mut user.image);
    }
}
