//! Reaction entity - one actor's typed reaction to one insight

use chrono::{DateTime, Utc};

use crate::toggle::ReactionState;
use crate::value_objects::{ActorId, InsightId, ReactionType};

/// Reaction entity
///
/// Unique per `(insight_id, actor_id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub insight_id: InsightId,
    pub actor_id: ActorId,
    pub actor_display_name: String,
    pub reaction_type: ReactionType,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(
        insight_id: InsightId,
        actor_id: ActorId,
        actor_display_name: String,
        reaction_type: ReactionType,
    ) -> Self {
        Self {
            insight_id,
            actor_id,
            actor_display_name,
            reaction_type,
            created_at: Utc::now(),
        }
    }

    /// Check if reaction is of a specific type
    #[inline]
    pub fn is_type(&self, reaction_type: ReactionType) -> bool {
        self.reaction_type == reaction_type
    }

    /// Toggle state this record represents
    pub fn state(&self) -> ReactionState {
        ReactionState::Reacted(self.reaction_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> ActorId {
        ActorId::parse("alice").unwrap()
    }

    #[test]
    fn test_reaction_creation() {
        let insight_id = InsightId::generate();
        let reaction = Reaction::new(
            insight_id,
            alice(),
            "Alice".to_string(),
            ReactionType::Love,
        );
        assert_eq!(reaction.insight_id, insight_id);
        assert_eq!(reaction.actor_id, alice());
        assert_eq!(reaction.reaction_type, ReactionType::Love);
    }

    #[test]
    fn test_is_type() {
        let reaction = Reaction::new(
            InsightId::generate(),
            alice(),
            "Alice".to_string(),
            ReactionType::Fire,
        );
        assert!(reaction.is_type(ReactionType::Fire));
        assert!(!reaction.is_type(ReactionType::Like));
        assert_eq!(reaction.state(), ReactionState::Reacted(ReactionType::Fire));
    }
}
