//! Session identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque server-side session handle returned by the upload endpoint.
///
/// The backend mints these (timestamp- or uuid-shaped); the client treats
/// them as opaque strings and only checks they are path-safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a raw session identifier, rejecting values that would not be
    /// safe to interpolate into a URL path.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidSessionId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidSessionId::Empty);
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(InvalidSessionId::UnsafeCharacters(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvalidSessionId {
    #[error("session id is empty")]
    Empty,

    #[error("session id contains unsafe characters: {0}")]
    UnsafeCharacters(String),
}
