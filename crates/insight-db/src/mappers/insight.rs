//! Insight entity <-> model mapper

use insight_core::entities::{Insight, InsightAggregate};
use insight_core::error::DomainError;
use insight_core::value_objects::{InsightId, InsightType, Priority, Sentiment};

use crate::models::{AggregateModel, InsightModel};

use super::corrupt_row;

fn parse_optional<T>(
    raw: Option<String>,
    column: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, DomainError> {
    raw.map(|value| parse(&value).ok_or_else(|| corrupt_row(column, &value)))
        .transpose()
}

/// Convert InsightModel to Insight entity
impl TryFrom<InsightModel> for Insight {
    type Error = DomainError;

    fn try_from(model: InsightModel) -> Result<Self, Self::Error> {
        Ok(Insight {
            id: InsightId::new(model.id),
            author_id: model.author_id,
            author_name: model.author_name,
            content: model.content,
            event_id: model.event_id,
            sentiment: parse_optional(model.sentiment, "insights.sentiment", Sentiment::parse)?,
            priority: parse_optional(model.priority, "insights.priority", Priority::parse)?,
            insight_type: parse_optional(
                model.insight_type,
                "insights.insight_type",
                InsightType::parse,
            )?,
            captured_at: model.captured_at,
            reaction_counts: model.reaction_counts.0,
            reaction_total: model.reaction_total,
        })
    }
}

/// Convert AggregateModel to InsightAggregate
impl From<AggregateModel> for InsightAggregate {
    fn from(model: AggregateModel) -> Self {
        InsightAggregate {
            insight_id: InsightId::new(model.id),
            counts: model.reaction_counts.0,
            total: model.reaction_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use insight_core::value_objects::{ReactionCounts, ReactionType};
    use sqlx::types::Json;
    use uuid::Uuid;

    fn model() -> InsightModel {
        InsightModel {
            id: Uuid::new_v4(),
            author_id: "alice".to_string(),
            author_name: "Alice".to_string(),
            content: "Export to CSV please".to_string(),
            event_id: None,
            sentiment: Some("positive".to_string()),
            priority: None,
            insight_type: Some("feature_request".to_string()),
            captured_at: Utc::now(),
            reaction_counts: Json(ReactionCounts::zero().with(ReactionType::Love, 2)),
            reaction_total: 2,
        }
    }

    #[test]
    fn test_model_to_entity() {
        let insight = Insight::try_from(model()).unwrap();
        assert_eq!(insight.sentiment, Some(Sentiment::Positive));
        assert_eq!(insight.priority, None);
        assert_eq!(insight.insight_type, Some(InsightType::FeatureRequest));
        assert_eq!(insight.reaction_counts.get(ReactionType::Love), 2);
        assert!(insight.aggregate().is_consistent());
    }

    #[test]
    fn test_unknown_classification_is_an_error() {
        let mut bad = model();
        bad.priority = Some("urgent".to_string());
        assert!(Insight::try_from(bad).is_err());
    }
}
