//! Ordering strategies for the popularity feed

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use super::ReactionType;
use crate::entities::Insight;
use crate::error::DomainError;

/// How the popularity feed is ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopularitySort {
    /// `reaction_total` desc, then capture time desc
    #[default]
    Total,
    /// Same ordering as [`PopularitySort::Total`]; there is no time decay.
    /// Kept as its own variant so clients asking for it are echoed faithfully
    /// and a real trending rank can replace it without an API change.
    Trending,
    /// `reaction_counts[type]` desc, then `reaction_total` desc
    ByType(ReactionType),
}

impl PopularitySort {
    /// Collapse aliases to the ordering actually applied
    pub fn effective(self) -> Self {
        match self {
            Self::Trending => Self::Total,
            other => other,
        }
    }

    /// Wire name
    pub fn name(self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Trending => "trending",
            Self::ByType(kind) => kind.as_str(),
        }
    }

    /// Full feed ordering, ending in an id tie-break so pages are deterministic
    pub fn compare(self, a: &Insight, b: &Insight) -> Ordering {
        let primary = match self.effective() {
            Self::ByType(kind) => b
                .reaction_counts
                .get(kind)
                .cmp(&a.reaction_counts.get(kind))
                .then_with(|| b.reaction_total.cmp(&a.reaction_total)),
            _ => b
                .reaction_total
                .cmp(&a.reaction_total)
                .then_with(|| b.captured_at.cmp(&a.captured_at)),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl fmt::Display for PopularitySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PopularitySort {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl std::str::FromStr for PopularitySort {
    type Err = DomainError;

    /// Accepts `total`, `trending`, a reaction name (`love`) or `type:love`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().to_ascii_lowercase();
        match raw.as_str() {
            "total" => Ok(Self::Total),
            "trending" => Ok(Self::Trending),
            other => {
                let name = other.strip_prefix("type:").unwrap_or(other);
                ReactionType::parse(name)
                    .map(Self::ByType)
                    .ok_or_else(|| DomainError::ValidationError(format!("unknown sort '{s}'")))
            }
        }
    }
}
