//! Leaderboard row -> ContributorStats mapper

use insight_core::entities::{ContributorStats, PriorityCounts, SentimentCounts, TypeCounts};

use crate::models::ContributorStatsModel;

impl From<ContributorStatsModel> for ContributorStats {
    fn from(model: ContributorStatsModel) -> Self {
        ContributorStats {
            actor_id: model.author_id,
            display_name: model.display_name,
            total_insights: model.total_insights,
            sentiment: SentimentCounts {
                positive: model.positive_count,
                neutral: model.neutral_count,
                negative: model.negative_count,
            },
            priority: PriorityCounts {
                critical: model.critical_count,
                high: model.high_count,
                medium: model.medium_count,
                low: model.low_count,
            },
            types: TypeCounts {
                feature_request: model.feature_request_count,
                bug_report: model.bug_report_count,
                use_case: model.use_case_count,
                general: model.general_count,
            },
            distinct_event_count: model.distinct_event_count,
            last_activity_at: model.last_activity_at,
        }
    }
}
