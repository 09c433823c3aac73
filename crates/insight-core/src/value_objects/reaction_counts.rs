//! Per-type reaction counters
//!
//! Serialized as a JSON object keyed by reaction name. Every recognized kind
//! is always present, zeros included.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ReactionType;

/// Count per reaction type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ReactionCounts([i64; ReactionType::COUNT]);

impl ReactionCounts {
    /// All-zero counters
    pub const fn zero() -> Self {
        Self([0; ReactionType::COUNT])
    }

    /// Count for one type
    #[inline]
    pub fn get(&self, kind: ReactionType) -> i64 {
        self.0[kind.index()]
    }

    /// Overwrite the count for one type
    #[inline]
    pub fn set(&mut self, kind: ReactionType, count: i64) {
        self.0[kind.index()] = count;
    }

    /// Builder-style setter
    pub fn with(mut self, kind: ReactionType, count: i64) -> Self {
        self.set(kind, count);
        self
    }

    /// Sum over all types
    pub fn total(&self) -> i64 {
        self.0.iter().sum()
    }

    /// True when no count is negative
    pub fn is_non_negative(&self) -> bool {
        self.0.iter().all(|count| *count >= 0)
    }

    /// Iterate `(type, count)` in stable enum order
    pub fn iter(&self) -> impl Iterator<Item = (ReactionType, i64)> + '_ {
        ReactionType::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    /// Non-zero types ordered by descending count
    ///
    /// Ties keep enum declaration order (the sort is stable over `ALL`), never
    /// the insertion order of whatever map the counts came from.
    pub fn summary(&self) -> Vec<(ReactionType, i64)> {
        let mut entries: Vec<_> = self.iter().filter(|(_, count)| *count > 0).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Tally counts from a sequence of reaction types
    pub fn tally(kinds: impl IntoIterator<Item = ReactionType>) -> Self {
        let mut counts = Self::zero();
        for kind in kinds {
            counts.0[kind.index()] += 1;
        }
        counts
    }
}

impl FromIterator<(ReactionType, i64)> for ReactionCounts {
    fn from_iter<I: IntoIterator<Item = (ReactionType, i64)>>(iter: I) -> Self {
        let mut counts = Self::zero();
        for (kind, count) in iter {
            counts.0[kind.index()] += count;
        }
        counts
    }
}

impl Serialize for ReactionCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(ReactionType::COUNT))?;
        for (kind, count) in self.iter() {
            map.serialize_entry(kind.as_str(), &count)?;
        }
        map.end()
    }
}

// Missing keys read as zero (stored maps only gain keys once touched).
// Unknown keys are rejected: they mean the enumeration drifted from storage.
impl<'de> Deserialize<'de> for ReactionCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = ReactionCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of reaction type to count")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut counts = ReactionCounts::zero();
                while let Some((key, count)) = access.next_entry::<String, i64>()? {
                    let kind = ReactionType::parse(&key).ok_or_else(|| {
                        serde::de::Error::custom(format!("unknown reaction type: {key}"))
                    })?;
                    counts.set(kind, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_sums_every_type() {
        let counts = ReactionCounts::zero()
            .with(ReactionType::Love, 3)
            .with(ReactionType::Fire, 2);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_summary_orders_by_count_then_enum_order() {
        let counts = ReactionCounts::zero()
            .with(ReactionType::Celebrate, 2)
            .with(ReactionType::Like, 2)
            .with(ReactionType::Fire, 5)
            .with(ReactionType::Love, 0);

        assert_eq!(
            counts.summary(),
            vec![
                (ReactionType::Fire, 5),
                (ReactionType::Like, 2),
                (ReactionType::Celebrate, 2),
            ]
        );
    }

    #[test]
    fn test_serializes_all_types() {
        let counts = ReactionCounts::zero().with(ReactionType::Love, 1);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["love"], 1);
        assert_eq!(json["like"], 0);
        assert_eq!(json.as_object().unwrap().len(), ReactionType::COUNT);
    }

    #[test]
    fn test_deserialize_sparse_map() {
        let counts: ReactionCounts = serde_json::from_str(r#"{"fire": 4}"#).unwrap();
        assert_eq!(counts.get(ReactionType::Fire), 4);
        assert_eq!(counts.get(ReactionType::Like), 0);
    }

    #[test]
    fn test_deserialize_rejects_unknown_type() {
        assert!(serde_json::from_str::<ReactionCounts>(r#"{"angry": 1}"#).is_err());
    }

    #[test]
    fn test_tally() {
        let counts = ReactionCounts::tally([
            ReactionType::Like,
            ReactionType::Like,
            ReactionType::Insightful,
        ]);
        assert_eq!(counts.get(ReactionType::Like), 2);
        assert_eq!(counts.get(ReactionType::Insightful), 1);
        assert_eq!(counts.total(), 3);
    }
}
