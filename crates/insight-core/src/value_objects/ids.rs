//! Identifiers for the two external collaborators the reaction core addresses:
//! insights (owned by insight CRUD) and actors (owned by authentication).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum accepted length of an actor identifier
pub const MAX_ACTOR_ID_LEN: usize = 128;

/// Insight identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsightId(Uuid);

impl InsightId {
    /// Wrap an existing UUID
    #[inline]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdParseError::InvalidInsightId)
    }
}

impl fmt::Display for InsightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for InsightId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<InsightId> for Uuid {
    fn from(id: InsightId) -> Self {
        id.0
    }
}

impl std::str::FromStr for InsightId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsightId::parse(s)
    }
}

/// Actor identifier
///
/// Opaque, non-empty, at most [`MAX_ACTOR_ID_LEN`] bytes after trimming.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Validate and wrap an actor id
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdParseError::EmptyActorId);
        }
        if trimmed.len() > MAX_ACTOR_ID_LEN {
            return Err(IdParseError::ActorIdTooLong {
                max: MAX_ACTOR_ID_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow as string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ActorId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActorId::parse(s)
    }
}

impl<'de> Deserialize<'de> for ActorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        ActorId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error when parsing an identifier from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid insight id format")]
    InvalidInsightId,

    #[error("actor id must not be empty")]
    EmptyActorId,

    #[error("actor id too long: max {max} characters")]
    ActorIdTooLong { max: usize },
}
