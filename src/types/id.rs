//! Store-assigned record identities.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Opaque identity of a stored record.
///
/// Ids are UUIDv4 values minted by the store. Clients only ever see the
/// hyphenated string form and must treat it as an opaque token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Mint a fresh identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Syntactically validate a client-supplied id.
    ///
    /// Empty input and the `"null"` / `"undefined"` placeholders that
    /// browser clients produce from unset variables are rejected before any
    /// UUID parsing is attempted.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            "" | "null" | "undefined" => Err(Error::invalid_id(raw)),
            _ => Uuid::parse_str(raw)
                .map(Self)
                .map_err(|_| Error::invalid_id(raw)),
        }
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
