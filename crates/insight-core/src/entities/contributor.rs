//! Contributor leaderboard entries
//!
//! Built from insight authorship and classification only. Reactions play no
//! part in the leaderboard.

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet};
use std::cmp::Ordering;
use uuid::Uuid;

use super::Insight;
use crate::value_objects::{InsightType, Priority, Sentiment, TimeRange};

/// Sentiment breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SentimentCounts {
    pub positive: i64,
    pub neutral: i64,
    pub negative: i64,
}

/// Priority tier breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriorityCounts {
    pub critical: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

/// Insight type breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeCounts {
    pub feature_request: i64,
    pub bug_report: i64,
    pub use_case: i64,
    pub general: i64,
}

/// One actor's contribution summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorStats {
    pub actor_id: String,
    pub display_name: String,
    pub total_insights: i64,
    pub sentiment: SentimentCounts,
    pub priority: PriorityCounts,
    pub types: TypeCounts,
    pub distinct_event_count: i64,
    pub last_activity_at: Option<DateTime<Utc>>,
}

impl ContributorStats {
    pub fn new(actor_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            display_name: display_name.into(),
            total_insights: 0,
            sentiment: SentimentCounts::default(),
            priority: PriorityCounts::default(),
            types: TypeCounts::default(),
            distinct_event_count: 0,
            last_activity_at: None,
        }
    }

    /// Weighted impact, rounded half-up
    ///
    /// `total + 3·critical + 2·high + 1.5·feature_request + 1.5·bug_report
    /// + 2·use_case`. Computed on doubled integers so the half-step weights
    /// round exactly: 25.5 becomes 26.
    pub fn impact_score(&self) -> i64 {
        let doubled = 2 * self.total_insights
            + 6 * self.priority.critical
            + 4 * self.priority.high
            + 3 * self.types.feature_request
            + 3 * self.types.bug_report
            + 4 * self.types.use_case;
        (doubled + 1).div_euclid(2)
    }

    /// Leaderboard order: most insights first, then actor id ascending
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .total_insights
            .cmp(&self.total_insights)
            .then_with(|| self.actor_id.cmp(&other.actor_id))
    }

    fn record(&mut self, insight: &Insight) {
        self.total_insights += 1;

        match insight.sentiment {
            Some(Sentiment::Positive) => self.sentiment.positive += 1,
            Some(Sentiment::Neutral) => self.sentiment.neutral += 1,
            Some(Sentiment::Negative) => self.sentiment.negative += 1,
            None => {}
        }
        match insight.priority {
            Some(Priority::Critical) => self.priority.critical += 1,
            Some(Priority::High) => self.priority.high += 1,
            Some(Priority::Medium) => self.priority.medium += 1,
            Some(Priority::Low) => self.priority.low += 1,
            None => {}
        }
        match insight.insight_type {
            Some(InsightType::FeatureRequest) => self.types.feature_request += 1,
            Some(InsightType::BugReport) => self.types.bug_report += 1,
            Some(InsightType::UseCase) => self.types.use_case += 1,
            Some(InsightType::General) => self.types.general += 1,
            None => {}
        }

        if self
            .last_activity_at
            .is_none_or(|last| insight.captured_at > last)
        {
            self.last_activity_at = Some(insight.captured_at);
            self.display_name.clone_from(&insight.author_name);
        }
    }
}

/// Group insights inside `range` by author and rank them
///
/// The display name is taken from the author's most recent insight.
pub fn build_leaderboard<'a>(
    insights: impl IntoIterator<Item = &'a Insight>,
    range: &TimeRange,
    limit: usize,
) -> Vec<ContributorStats> {
    let mut by_actor: BTreeMap<&str, (ContributorStats, HashSet<Uuid>)> = BTreeMap::new();

    for insight in insights {
        if !range.contains(insight.captured_at) {
            continue;
        }
        let (stats, events) = by_actor
            .entry(insight.author_id.as_str())
            .or_insert_with(|| {
                (
                    ContributorStats::new(&insight.author_id, &insight.author_name),
                    HashSet::new(),
                )
            });
        stats.record(insight);
        if let Some(event_id) = insight.event_id {
            events.insert(event_id);
        }
    }

    let mut ranked: Vec<ContributorStats> = by_actor
        .into_values()
        .map(|(mut stats, events)| {
            stats.distinct_event_count = events.len() as i64;
            stats
        })
        .collect();
    ranked.sort_by(ContributorStats::rank_cmp);
    ranked.truncate(limit);
    ranked
}
