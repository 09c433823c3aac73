//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use insight_core::entities::{ContributorStats, Insight, InsightAggregate, Reaction};
use insight_core::value_objects::ReactionCounts;

use crate::services::{ReconcileReport, ToggleOutcome};

use super::responses::{
    ActorReactionResponse, PopularInsightResponse, PriorityBreakdown, ReactionSummaryEntry,
    ReactorResponse, ReconcileReportResponse, RemoveReactionResponse, SentimentBreakdown,
    ToggleReactionResponse, TypeBreakdown,
};

// ============================================================================
// Reaction Mappers
// ============================================================================

/// Non-zero types, most frequent first
pub fn reaction_summary(counts: &ReactionCounts) -> Vec<ReactionSummaryEntry> {
    counts
        .summary()
        .into_iter()
        .map(|(reaction_type, count)| ReactionSummaryEntry {
            reaction_type,
            emoji: reaction_type.emoji(),
            count,
        })
        .collect()
}

impl From<&Reaction> for ReactorResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            actor_id: reaction.actor_id.to_string(),
            display_name: reaction.actor_display_name.clone(),
            reaction_type: reaction.reaction_type,
            created_at: reaction.created_at,
        }
    }
}

impl From<&Reaction> for ActorReactionResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            insight_id: reaction.insight_id,
            reaction_type: reaction.reaction_type,
            created_at: reaction.created_at,
        }
    }
}

impl From<ToggleOutcome> for ToggleReactionResponse {
    fn from(outcome: ToggleOutcome) -> Self {
        Self {
            action: outcome.action,
            user_reaction: outcome.reaction_type,
            reaction_counts: outcome.aggregate.counts,
            reaction_total: outcome.aggregate.total,
        }
    }
}

impl From<InsightAggregate> for RemoveReactionResponse {
    fn from(aggregate: InsightAggregate) -> Self {
        Self {
            reaction_counts: aggregate.counts,
            reaction_total: aggregate.total,
        }
    }
}

// ============================================================================
// Popularity Mappers
// ============================================================================

impl From<Insight> for PopularInsightResponse {
    fn from(insight: Insight) -> Self {
        Self {
            reaction_summary: reaction_summary(&insight.reaction_counts),
            id: insight.id,
            author_id: insight.author_id,
            author_name: insight.author_name,
            content: insight.content,
            event_id: insight.event_id,
            sentiment: insight.sentiment,
            priority: insight.priority,
            insight_type: insight.insight_type,
            captured_at: insight.captured_at,
            reaction_counts: insight.reaction_counts,
            reaction_total: insight.reaction_total,
            user_reaction: None,
        }
    }
}

// ============================================================================
// Leaderboard Mappers
// ============================================================================

impl From<&ContributorStats> for SentimentBreakdown {
    fn from(stats: &ContributorStats) -> Self {
        Self {
            positive: stats.sentiment.positive,
            neutral: stats.sentiment.neutral,
            negative: stats.sentiment.negative,
        }
    }
}

impl From<&ContributorStats> for PriorityBreakdown {
    fn from(stats: &ContributorStats) -> Self {
        Self {
            critical: stats.priority.critical,
            high: stats.priority.high,
            medium: stats.priority.medium,
            low: stats.priority.low,
        }
    }
}

impl From<&ContributorStats> for TypeBreakdown {
    fn from(stats: &ContributorStats) -> Self {
        Self {
            feature_request: stats.types.feature_request,
            bug_report: stats.types.bug_report,
            use_case: stats.types.use_case,
            general: stats.types.general,
        }
    }
}

// ============================================================================
// Admin Mappers
// ============================================================================

impl From<ReconcileReport> for ReconcileReportResponse {
    fn from(report: ReconcileReport) -> Self {
        Self {
            scanned: report.scanned,
            corrected: report.corrected,
            next_cursor: report.next_cursor,
        }
    }
}
