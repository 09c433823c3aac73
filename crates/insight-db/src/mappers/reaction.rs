//! Reaction entity <-> model mapper

use insight_core::entities::Reaction;
use insight_core::error::DomainError;
use insight_core::value_objects::{ActorId, InsightId, ReactionCounts, ReactionType};

use crate::models::{ReactionCountModel, ReactionModel};

use super::corrupt_row;

/// Convert ReactionModel to Reaction entity
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        let reaction_type = ReactionType::parse(&model.reaction_type)
            .ok_or_else(|| corrupt_row("reactions.reaction_type", &model.reaction_type))?;
        let actor_id = ActorId::parse(&model.actor_id)
            .map_err(|_| corrupt_row("reactions.actor_id", &model.actor_id))?;

        Ok(Reaction {
            insight_id: InsightId::new(model.insight_id),
            actor_id,
            actor_display_name: model.actor_display_name,
            reaction_type,
            created_at: model.created_at,
        })
    }
}

/// Convert a batch of rows, failing on the first corrupt one
pub fn reactions_from_models(models: Vec<ReactionModel>) -> Result<Vec<Reaction>, DomainError> {
    models.into_iter().map(Reaction::try_from).collect()
}

/// Fold grouped `(type, count)` rows into counters
pub fn counts_from_models(rows: Vec<ReactionCountModel>) -> Result<ReactionCounts, DomainError> {
    rows.into_iter()
        .map(|row| {
            ReactionType::parse(&row.reaction_type)
                .map(|kind| (kind, row.count))
                .ok_or_else(|| corrupt_row("reactions.reaction_type", &row.reaction_type))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|pairs| pairs.into_iter().collect())
}

/// Reaction values prepared for database insertion
pub struct ReactionInsert<'a> {
    pub insight_id: uuid::Uuid,
    pub actor_id: &'a str,
    pub actor_display_name: &'a str,
    pub reaction_type: &'static str,
}

impl<'a> ReactionInsert<'a> {
    pub fn new(reaction: &'a Reaction) -> Self {
        Self {
            insight_id: reaction.insight_id.into_inner(),
            actor_id: reaction.actor_id.as_str(),
            actor_display_name: &reaction.actor_display_name,
            reaction_type: reaction.reaction_type.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn model(reaction_type: &str) -> ReactionModel {
        ReactionModel {
            insight_id: Uuid::new_v4(),
            actor_id: "alice".to_string(),
            actor_display_name: "Alice".to_string(),
            reaction_type: reaction_type.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_entity() {
        let reaction = Reaction::try_from(model("fire")).unwrap();
        assert_eq!(reaction.reaction_type, ReactionType::Fire);
        assert_eq!(reaction.actor_id.as_str(), "alice");
    }

    #[test]
    fn test_unknown_stored_type_is_an_error() {
        let err = Reaction::try_from(model("angry")).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }

    #[test]
    fn test_counts_from_rows() {
        let counts = counts_from_models(vec![
            ReactionCountModel {
                reaction_type: "like".to_string(),
                count: 3,
            },
            ReactionCountModel {
                reaction_type: "celebrate".to_string(),
                count: 1,
            },
        ])
        .unwrap();
        assert_eq!(counts.get(ReactionType::Like), 3);
        assert_eq!(counts.get(ReactionType::Celebrate), 1);
        assert_eq!(counts.total(), 4);
    }
}
