//! Reaction type - the closed, versioned set of reaction kinds
//!
//! Adding a kind is a schema change: the `reactions.reaction_type` check
//! constraint and every `insights.reaction_counts` map must be migrated
//! together with [`REACTION_SCHEMA_VERSION`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of the reaction enumeration
pub const REACTION_SCHEMA_VERSION: u32 = 1;

/// A recognized reaction kind
///
/// Declaration order is the stable tie-break order used wherever reaction
/// types are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    Like,
    Love,
    Fire,
    Insightful,
    Celebrate,
}

impl ReactionType {
    /// Number of recognized kinds
    pub const COUNT: usize = 5;

    /// Every kind, in stable order
    pub const ALL: [ReactionType; Self::COUNT] = [
        Self::Like,
        Self::Love,
        Self::Fire,
        Self::Insightful,
        Self::Celebrate,
    ];

    /// Wire and storage name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Love => "love",
            Self::Fire => "fire",
            Self::Insightful => "insightful",
            Self::Celebrate => "celebrate",
        }
    }

    /// Display glyph used in human-readable summaries
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Like => "👍",
            Self::Love => "❤️",
            Self::Fire => "🔥",
            Self::Insightful => "💡",
            Self::Celebrate => "🎉",
        }
    }

    /// Position in [`ReactionType::ALL`]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse a wire name; unknown names are rejected, never coerced
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReactionType {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReactionType::parse(s).ok_or_else(|| crate::error::DomainError::UnknownReactionType(s.to_string()))
    }
}
