//! Profile records - the personality-typed entries the directory lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{clean, Patch, Record, RecordId};
use crate::error::{Error, Result};

pub(crate) const NAME_REQUIRED: &str = "Name is required";

/// A stored profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub mbti: String,
    pub enneagram: String,
    pub variant: String,
    pub tritype: Option<u32>,
    pub socionics: String,
    pub sloan: String,
    pub psyche: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Profile {
    const ENTITY: &'static str = "Profile";

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Body of a profile creation request. Every field is optional at the
/// transport level; `name` is enforced by the service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub mbti: Option<String>,
    pub enneagram: Option<String>,
    pub variant: Option<String>,
    #[serde(deserialize_with = "tritype")]
    pub tritype: Option<u32>,
    pub socionics: Option<String>,
    pub sloan: Option<String>,
    pub psyche: Option<String>,
    pub image: Option<String>,
}

impl ProfileDraft {
    /// The trimmed name, or a validation error if it is missing or blank.
    pub fn required_name(&self) -> Result<String> {
        self.name
            .as_deref()
            .map(clean)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::validation(NAME_REQUIRED))
    }

    /// Build the record to persist. `image` must already be resolved.
    pub fn into_profile(self, name: String, image: String) -> Profile {
        let text = |value: Option<String>| value.as_deref().map(clean).unwrap_or_default();
        let now = Utc::now();

        Profile {
            id: RecordId::new(),
            name,
            description: text(self.description),
            mbti: text(self.mbti),
            enneagram: text(self.enneagram),
            variant: text(self.variant),
            tritype: self.tritype.filter(|t| *t != 0),
            socionics: text(self.socionics),
            sloan: text(self.sloan),
            psyche: text(self.psyche),
            image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Tritype as sent by clients: a number, or a string holding one.
#[derive(Deserialize)]
#[serde(untagged)]
enum TritypeInput {
    Number(u32),
    Text(String),
}

/// Accepts `725`, `"725"`, and `null`. A blank string counts as `null`.
fn tritype<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<u32>, D::Error> {
    match Option::<TritypeInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TritypeInput::Number(n)) => Ok(Some(n)),
        Some(TritypeInput::Text(text)) => match text.trim() {
            "" => Ok(None),
            digits => digits
                .parse()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("Cast to Number failed for tritype \"{}\"", text))),
        },
    }
}

fn tritype_patch<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Patch<u32>, D::Error> {
    tritype(deserializer).map(|value| value.map_or(Patch::Null, Patch::Value))
}

/// Partial update of a profile: only keys present in the request change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfilePatch {
    pub name: Patch<String>,
    pub description: Patch<String>,
    pub mbti: Patch<String>,
    pub enneagram: Patch<String>,
    pub variant: Patch<String>,
    #[serde(deserialize_with = "tritype_patch")]
    pub tritype: Patch<u32>,
    pub socionics: Patch<String>,
    pub sloan: Patch<String>,
    pub psyche: Patch<String>,
    pub image: Patch<String>,
}

impl ProfilePatch {
    /// Reject patches that would leave the profile without a name.
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Patch::Missing => Ok(()),
            Patch::Value(name) if !name.trim().is_empty() => Ok(()),
            _ => Err(Error::validation(NAME_REQUIRED)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_missing()
            && self.description.is_missing()
            && self.mbti.is_missing()
            && self.enneagram.is_missing()
            && self.variant.is_missing()
            && self.tritype.is_missing()
            && self.socionics.is_missing()
            && self.sloan.is_missing()
            && self.psyche.is_missing()
            && self.image.is_missing()
    }

    /// Apply the present keys to `profile`. Does not touch timestamps.
    pub fn apply(&self, profile: &mut Profile) {
        let trimmed = |patch: &Patch<String>| patch.clone().map(|v| clean(&v));

        trimmed(&self.name).apply_to(&mut profile.name);
        trimmed(&self.description).apply_to(&mut profile.description);
        trimmed(&self.mbti).apply_to(&mut profile.mbti);
        trimmed(&self.enneagram).apply_to(&mut profile.enneagram);
        trimmed(&self.variant).apply_to(&mut profile.variant);
        self.tritype.apply_to_option(&mut profile.tritype);
        trimmed(&self.socionics).apply_to(&mut profile.socionics);
        trimmed(&self.sloan).apply_to(&mut profile.sloan);
        trimmed(&self.psyche).apply_to(&mut profile.psyche);
        trimmed(&self.image).apply_to(&mut profile.image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profile {
        let draft = ProfileDraft {
            name: Some("A Martinez".into()),
            description: Some("Adolph Larrue Martinez III.".into()),
            mbti: Some("ISFJ".into()),
            enneagram: Some("9w3".into()),
            tritype: Some(725),
            ..Default::default()
        };
        let name = draft.required_name().unwrap();
        draft.into_profile(name, "https://example.com/1.png".into())
    }

    #[test]
    fn test_required_name() {
        assert!(ProfileDraft::default().required_name().is_err());
        let blank = ProfileDraft { name: Some("   ".into()), ..Default::default() };
        assert_eq!(blank.required_name().unwrap_err().to_string(), NAME_REQUIRED);
        let padded = ProfileDraft { name: Some("  Jane ".into()), ..Default::default() };
        assert_eq!(padded.required_name().unwrap(), "Jane");
    }

    #[test]
    fn test_into_profile_defaults() {
        let draft = ProfileDraft { name: Some("Jane".into()), tritype: Some(0), ..Default::default() };
        let profile = draft.into_profile("Jane".into(), "img".into());
        assert_eq!(profile.description, "");
        assert_eq!(profile.socionics, "");
        assert_eq!(profile.tritype, None);
        assert_eq!(profile.created_at, profile.updated_at);
    }

    #[test]
    fn test_patch_only_touches_present_keys() {
        let mut profile = sample();
        let patch: ProfilePatch =
            serde_json::from_str(r#"{"mbti": " INTP ", "tritype": null}"#).unwrap();
        patch.apply(&mut profile);

        assert_eq!(profile.mbti, "INTP");
        assert_eq!(profile.tritype, None);
        assert_eq!(profile.name, "A Martinez");
        assert_eq!(profile.enneagram, "9w3");
    }

    #[test]
    fn test_patch_null_clears_text() {
        let mut profile = sample();
        let patch: ProfilePatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        patch.apply(&mut profile);
        assert_eq!(profile.description, "");
    }

    #[test]
    fn test_patch_validate_name() {
        let ok: ProfilePatch = serde_json::from_str(r#"{"name": "B"}"#).unwrap();
        assert!(ok.validate().is_ok());
        let null: ProfilePatch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(null.validate().is_err());
        let blank: ProfilePatch = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert!(blank.validate().is_err());
        assert!(ProfilePatch::default().is_empty());
    }

    #[test]
    fn test_tritype_accepts_numeric_strings() {
        let draft: ProfileDraft = serde_json::from_str(r#"{"name": "Jane", "tritype": "725"}"#).unwrap();
        assert_eq!(draft.tritype, Some(725));
        let draft: ProfileDraft = serde_json::from_str(r#"{"tritype": 548}"#).unwrap();
        assert_eq!(draft.tritype, Some(548));
        let draft: ProfileDraft = serde_json::from_str(r#"{"tritype": ""}"#).unwrap();
        assert_eq!(draft.tritype, None);
        assert!(serde_json::from_str::<ProfileDraft>(r#"{"tritype": "seven"}"#).is_err());

        let patch: ProfilePatch = serde_json::from_str(r#"{"tritype": " 369 "}"#).unwrap();
        assert_eq!(patch.tritype, Patch::Value(369));
        let patch: ProfilePatch = serde_json::from_str(r#"{"tritype": null}"#).unwrap();
        assert_eq!(patch.tritype, Patch::Null);
        assert!(ProfilePatch::default().tritype.is_missing());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("_id").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["tritype"], 725);
        assert_eq!(json["mbti"], "ISFJ");
    }
}
