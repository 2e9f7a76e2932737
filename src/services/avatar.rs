//! Default avatar URLs for records created without an image.

/// Default avatar endpoint
pub const DEFAULT_AVATAR_BASE: &str = "https://ui-avatars.com/api/";

/// Builds `<base>?name=<encoded name>` avatar URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUrl {
    base: String,
}

impl AvatarUrl {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Avatar URL for `name`, percent-encoded like `encodeURIComponent`.
    pub fn for_name(&self, name: &str) -> String {
        format!("{}?name={}", self.base, urlencoding::encode(name))
    }

    /// `image` if it is a non-blank string, otherwise the avatar for `name`.
    pub fn resolve(&self, image: Option<&str>, name: &str) -> String {
        match image.map(str::trim) {
            Some(image) if !image.is_empty() => image.to_string(),
            _ => self.for_name(name),
        }
    }
}

impl Default for AvatarUrl {
    fn default() -> Self {
        Self::new(DEFAULT_AVATAR_BASE)
    }
}
