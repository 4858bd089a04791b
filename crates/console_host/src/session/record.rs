//! Opaque session payloads handed over by the identity provider.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
/// JSON-shaped record whose schema belongs to an external collaborator.
///
/// The session store only stores and retrieves these; it never looks inside. A record is never
/// JSON `null`, since a stored `null` reads back as "unset".
pub struct OpaqueRecord(Value);

impl OpaqueRecord {
    /// Wraps a JSON value. Returns `None` for JSON `null`.
    pub fn new(value: Value) -> Option<Self> {
        (!value.is_null()).then_some(Self(value))
    }

    /// Parses a JSON document. A JSON `null` yields `None`.
    pub(crate) fn parse(raw: &str) -> Result<Option<Self>, serde_json::Error> {
        serde_json::from_str(raw).map(Self::new)
    }

    /// Deserializes the record into a caller-owned type.
    ///
    /// # Errors
    ///
    /// Returns an error when the record does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, String> {
        T::deserialize(&self.0).map_err(|e| e.to_string())
    }

    /// Encodes the record as compact JSON text.
    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Opaque session credential, persisted as a raw string.
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw credential string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw credential.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty credential, which is never persisted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl From<String> for SessionToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for SessionToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
