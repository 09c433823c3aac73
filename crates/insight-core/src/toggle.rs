//! Reaction toggle state machine
//!
//! Per `(insight, actor)` pair the state is either [`ReactionState::None`] or
//! [`ReactionState::Reacted`]. Submitting a type moves between them:
//!
//! | current        | request      | next           | delta                 | action  |
//! |----------------|--------------|----------------|-----------------------|---------|
//! | `None`         | `t`          | `Reacted(t)`   | `+1 t`, `+1 total`    | added   |
//! | `Reacted(t)`   | `t`          | `None`         | `-1 t`, `-1 total`    | removed |
//! | `Reacted(t)`   | `u != t`     | `Reacted(u)`   | `-1 t`, `+1 u`        | changed |
//!
//! Nothing here touches storage.

use serde::{Deserialize, Serialize};

use crate::value_objects::ReactionType;

/// Current reaction of one actor on one insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReactionState {
    #[default]
    None,
    Reacted(ReactionType),
}

impl ReactionState {
    /// Build from an optional stored reaction type
    pub fn from_current(current: Option<ReactionType>) -> Self {
        current.map_or(Self::None, Self::Reacted)
    }

    /// The reaction type held, if any
    pub fn reaction_type(self) -> Option<ReactionType> {
        match self {
            Self::None => None,
            Self::Reacted(kind) => Some(kind),
        }
    }

    /// Apply a submission of `requested`
    pub fn transition(self, requested: ReactionType) -> Transition {
        match self {
            Self::None => Transition {
                action: ToggleAction::Added,
                next: Self::Reacted(requested),
                delta: CounterDelta::add(requested),
            },
            Self::Reacted(current) if current == requested => Transition {
                action: ToggleAction::Removed,
                next: Self::None,
                delta: CounterDelta::remove(current),
            },
            Self::Reacted(current) => Transition {
                action: ToggleAction::Changed,
                next: Self::Reacted(requested),
                delta: CounterDelta::change(current, requested),
            },
        }
    }
}

/// What a submission did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Added,
    Removed,
    Changed,
}

impl ToggleAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
        }
    }
}

/// Outcome of [`ReactionState::transition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: ToggleAction,
    pub next: ReactionState,
    pub delta: CounterDelta,
}

/// Signed change to an insight's reaction counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    counts: [i64; ReactionType::COUNT],
    total: i64,
}

impl CounterDelta {
    /// `+1` to `kind` and total
    pub fn add(kind: ReactionType) -> Self {
        let mut delta = Self::default();
        delta.counts[kind.index()] = 1;
        delta.total = 1;
        delta
    }

    /// `-1` to `kind` and total
    pub fn remove(kind: ReactionType) -> Self {
        let mut delta = Self::default();
        delta.counts[kind.index()] = -1;
        delta.total = -1;
        delta
    }

    /// `-1` to `from`, `+1` to `to`, total unchanged
    pub fn change(from: ReactionType, to: ReactionType) -> Self {
        let mut delta = Self::default();
        delta.counts[from.index()] -= 1;
        delta.counts[to.index()] += 1;
        delta
    }

    /// Change applied to the total
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Change applied to one type
    pub fn get(&self, kind: ReactionType) -> i64 {
        self.counts[kind.index()]
    }

    /// Non-zero per-type changes, decrements first
    ///
    /// Storage applies these one at a time; decrementing first means a
    /// drifted counter is caught before anything is incremented.
    pub fn changes(&self) -> Vec<(ReactionType, i64)> {
        let mut changes: Vec<_> = ReactionType::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, change)| *change != 0)
            .collect();
        changes.sort_by_key(|(_, change)| *change);
        changes
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0 && self.counts.iter().all(|change| *change == 0)
    }
}
