//! Record identifier - UUID v4 primary key shared by every table

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::{Uuid, Version};

/// Primary key of every persisted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random identifier
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. a database column)
    #[inline]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the inner UUID value
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse from string representation
    ///
    /// Only hyphenated or simple UUIDs of version 4 are accepted.
    pub fn parse(s: &str) -> Result<Self, RecordIdParseError> {
        let id = Uuid::parse_str(s.trim()).map_err(|_| RecordIdParseError::InvalidFormat)?;
        if id.get_version() != Some(Version::Random) {
            return Err(RecordIdParseError::NotVersion4);
        }
        Ok(Self(id))
    }

    /// Short uppercase prefix, used for human-facing reference numbers
    pub fn short_code(&self) -> String {
        self.0.simple().to_string()[..8].to_uppercase()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

/// Error when parsing a RecordId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordIdParseError {
    #[error("invalid identifier format")]
    InvalidFormat,

    #[error("identifier is not a version 4 UUID")]
    NotVersion4,
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<RecordId> for Uuid {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0.hyphenated())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        RecordId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
