//! Record shapes for the two backend collections
//!
//! The backend is authoritative for all of these; the client only ever
//! holds a transient replica rebuilt wholesale from `GET` responses.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The two independent backend collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    CreativityPaths,
}

impl Collection {
    /// URL path segment for this collection
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::CreativityPaths => "creativity-paths",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Opaque backend-assigned record identity
///
/// The backend's id representation is unspecified; both JSON strings
/// and JSON numbers occur in observed payloads. Either form decodes to
/// the same canonical value, so a numeric `7` and a string `"7"`
/// compare equal after deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Num(n) => RecordId(n.to_string()),
            Raw::Str(s) => RecordId(s),
        })
    }
}

/// A user as listed by `GET /users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    /// Free text; early backend versions constrained this to a fixed
    /// category list, later versions do not
    #[serde(default)]
    pub discipline: String,
}

/// Pending input for `POST /users`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub discipline: String,
}

impl UserDraft {
    /// Presence check matching the required form fields (name, email)
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::InvalidInput("name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(crate::Error::InvalidInput("email is required".to_string()));
        }
        Ok(())
    }
}

/// A creativity path as listed by `GET /creativity-paths`
///
/// Nine free-text attribute fields; whitespace is preserved as-is.
/// The `user_id` reference should match an existing user but may
/// dangle, which the listing tolerates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativityPathRecord {
    pub id: RecordId,
    #[serde(default)]
    pub user_id: RecordId,
    #[serde(default)]
    pub misfit: String,
    #[serde(default)]
    pub recall: String,
    #[serde(default)]
    pub flow: String,
    #[serde(default)]
    pub wide_path: String,
    #[serde(default)]
    pub spark: String,
    #[serde(default)]
    pub strategic_flow: String,
    #[serde(default)]
    pub narrow_path: String,
    #[serde(default)]
    pub bright_spark: String,
    #[serde(default)]
    pub ahh: String,
}

/// Pending input for `POST /creativity-paths`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathDraft {
    /// Selected user; `None` until the caller picks one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub misfit: String,
    #[serde(default)]
    pub recall: String,
    #[serde(default)]
    pub flow: String,
    #[serde(default)]
    pub wide_path: String,
    #[serde(default)]
    pub spark: String,
    #[serde(default)]
    pub strategic_flow: String,
    #[serde(default)]
    pub narrow_path: String,
    #[serde(default)]
    pub bright_spark: String,
    #[serde(default)]
    pub ahh: String,
}

impl PathDraft {
    /// Presence check matching the required user selection
    pub fn validate(&self) -> crate::Result<()> {
        match &self.user_id {
            Some(id) if !id.is_empty() => Ok(()),
            _ => Err(crate::Error::InvalidInput(
                "a user must be selected".to_string(),
            )),
        }
    }
}
