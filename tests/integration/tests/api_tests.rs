//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL (migrations run at startup)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

fn react_path(insight_id: uuid::Uuid) -> String {
    format!("/insights/{insight_id}/react")
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Toggle Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_scenarios() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let insight_id = seed_insight(&server.pool, &unique_actor("author"), chrono::Duration::hours(1))
        .await
        .unwrap();
    let alice = unique_actor("alice");
    let path = react_path(insight_id);

    // Added
    let response = server.post(&path, &SubmitReaction::new(&alice, "love")).await.unwrap();
    let toggled: ToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.action, "added");
    assert_eq!(toggled.user_reaction.as_deref(), Some("love"));
    assert_eq!(toggled.reaction_counts["love"], 1);
    assert_eq!(toggled.reaction_total, 1);

    // Changed
    let response = server.post(&path, &SubmitReaction::new(&alice, "fire")).await.unwrap();
    let toggled: ToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.action, "changed");
    assert_eq!(toggled.reaction_counts["love"], 0);
    assert_eq!(toggled.reaction_counts["fire"], 1);
    assert_eq!(toggled.reaction_total, 1);

    // Removed
    let response = server.post(&path, &SubmitReaction::new(&alice, "fire")).await.unwrap();
    let toggled: ToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggled.action, "removed");
    assert_eq!(toggled.user_reaction, None);
    assert_eq!(toggled.reaction_total, 0);
}

#[tokio::test]
async fn test_concurrent_actors_both_count() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let insight_id = seed_insight(&server.pool, &unique_actor("author"), chrono::Duration::hours(1))
        .await
        .unwrap();
    let path = react_path(insight_id);
    let actors: Vec<String> = (0..10).map(|_| unique_actor("crowd")).collect();

    let requests: Vec<SubmitReaction> = actors
        .iter()
        .map(|actor| SubmitReaction::new(actor, "like"))
        .collect();
    let responses = join_all(requests.iter().map(|request| server.post(&path, request)))
    .await;
    for response in responses {
        assert_status(response.unwrap(), StatusCode::OK).await.unwrap();
    }

    let response = server.get(&path).await.unwrap();
    let snapshot: SnapshotResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(snapshot.reaction_counts["like"], 10);
    assert_eq!(snapshot.reaction_total, 10);
    assert_eq!(snapshot.recent_reactors.len(), 10);

    let (stored,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reactions WHERE insight_id = $1")
        .bind(insight_id)
        .fetch_one(&server.pool)
        .await
        .unwrap();
    assert_eq!(stored, 10);
}

#[tokio::test]
async fn test_same_actor_concurrent_submits_serialize() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let insight_id = seed_insight(&server.pool, &unique_actor("author"), chrono::Duration::hours(1))
        .await
        .unwrap();
    let alice = unique_actor("alice");
    let path = react_path(insight_id);
    let request = SubmitReaction::new(&alice, "love");

    let responses = join_all((0..2).map(|_| server.post(&path, &request))).await;
    let mut actions = Vec::new();
    for response in responses {
        let toggled: ToggleResponse = assert_json(response.unwrap(), StatusCode::OK).await.unwrap();
        actions.push(toggled.action);
    }
    actions.sort();
    assert_eq!(actions, vec!["added".to_string(), "removed".to_string()]);

    let response = server.get(&path).await.unwrap();
    let snapshot: SnapshotResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(snapshot.reaction_counts["love"], 0);
    assert_eq!(snapshot.reaction_total, 0);

    let (stored,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reactions WHERE insight_id = $1")
        .bind(insight_id)
        .fetch_one(&server.pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_toggle_validation_and_missing_insight() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let insight_id = seed_insight(&server.pool, &unique_actor("author"), chrono::Duration::hours(1))
        .await
        .unwrap();

    let response = server
        .post(&react_path(insight_id), &SubmitReaction::new("bob", "angry"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_REACTION_TYPE");

    let response = server
        .post(&react_path(uuid::Uuid::new_v4()), &SubmitReaction::new("bob", "like"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_INSIGHT");
}

// ============================================================================
// Removal Tests
// ============================================================================

#[tokio::test]
async fn test_remove_then_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let insight_id = seed_insight(&server.pool, &unique_actor("author"), chrono::Duration::hours(1))
        .await
        .unwrap();
    let bob = unique_actor("bob");
    let path = react_path(insight_id);

    server.post(&path, &SubmitReaction::new(&bob, "insightful")).await.unwrap();

    let remove = RemoveReaction { actor_id: bob.clone() };
    let response = server.delete(&path, &remove).await.unwrap();
    let aggregate: AggregateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(aggregate.reaction_total, 0);
    assert_eq!(aggregate.reaction_counts["insightful"], 0);

    let response = server.delete(&path, &remove).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_REACTION");
}

// ============================================================================
// Read Tests
// ============================================================================

#[tokio::test]
async fn test_snapshot_names_viewer_reaction() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let insight_id = seed_insight(&server.pool, &unique_actor("author"), chrono::Duration::hours(1))
        .await
        .unwrap();
    let carol = unique_actor("carol");
    let path = react_path(insight_id);

    server.post(&path, &SubmitReaction::new(&carol, "celebrate")).await.unwrap();

    let response = server.get(&format!("{path}?actorId={carol}")).await.unwrap();
    let snapshot: SnapshotResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(snapshot.insight_id, insight_id);
    assert_eq!(snapshot.user_reaction.as_deref(), Some("celebrate"));
    assert_eq!(snapshot.recent_reactors[0].actor_id, carol);
    assert_eq!(snapshot.recent_reactors[0].reaction_type, "celebrate");
    assert_eq!(snapshot.recent_reactors[0].display_name, carol.to_uppercase());
}

#[tokio::test]
async fn test_popular_feed_skips_unreacted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = unique_actor("author");
    let quiet = seed_insight(&server.pool, &author, chrono::Duration::minutes(5)).await.unwrap();
    let loud = seed_insight(&server.pool, &author, chrono::Duration::minutes(6)).await.unwrap();
    server
        .post(&react_path(loud), &SubmitReaction::new(&unique_actor("fan"), "fire"))
        .await
        .unwrap();

    let response = server.get("/insights/popular?period=day&limit=100").await.unwrap();
    let page: PopularResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(page.insights.iter().all(|item| item.reaction_total > 0));
    assert!(page.insights.iter().any(|item| item.id == loud));
    assert!(page.insights.iter().all(|item| item.id != quiet));
    assert!(page
        .insights
        .windows(2)
        .all(|pair| pair[0].reaction_total >= pair[1].reaction_total));
    assert_eq!(page.pagination.limit, 100);
    assert_eq!(page.pagination.offset, 0);
}

#[tokio::test]
async fn test_leaderboard_counts_authored_insights() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = unique_actor("prolific");
    for minutes in 1..=3 {
        seed_insight(&server.pool, &author, chrono::Duration::minutes(minutes)).await.unwrap();
    }

    let response = server.get("/insights/leaderboard?period=all&limit=100").await.unwrap();
    let board: LeaderboardResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(board.entries.windows(2).all(|pair| pair[0].rank < pair[1].rank));
    if let Some(entry) = board.entries.iter().find(|entry| entry.actor_id == author) {
        assert_eq!(entry.total_insights, 3);
        assert_eq!(entry.impact_score, 3);
    }
}

#[tokio::test]
async fn test_actor_history_and_distribution() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = unique_actor("author");
    let first = seed_insight(&server.pool, &author, chrono::Duration::hours(1)).await.unwrap();
    let second = seed_insight(&server.pool, &author, chrono::Duration::hours(2)).await.unwrap();
    let dana = unique_actor("dana");

    server.post(&react_path(first), &SubmitReaction::new(&dana, "like")).await.unwrap();
    server.post(&react_path(second), &SubmitReaction::new(&dana, "love")).await.unwrap();

    let response = server.get(&format!("/actors/{dana}/reactions")).await.unwrap();
    let history: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["insightId"], second.to_string());

    let response = server.get("/reactions/distribution?period=day").await.unwrap();
    let distribution: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    for kind in ["like", "love", "fire", "insightful", "celebrate"] {
        assert!(distribution["reactionCounts"][kind].is_i64());
    }
}

// ============================================================================
// Reconciliation Tests
// ============================================================================

#[tokio::test]
async fn test_reconcile_repairs_drift() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let insight_id = seed_insight(&server.pool, &unique_actor("author"), chrono::Duration::hours(1))
        .await
        .unwrap();
    corrupt_aggregate(&server.pool, insight_id, 7).await.unwrap();

    // Walk the whole table so the corrupted row is covered
    let mut cursor: Option<uuid::Uuid> = None;
    let mut corrected = 0;
    loop {
        let body = serde_json::json!({ "afterCursor": cursor, "batchSize": 1000 });
        let response = server.post("/admin/reconcile", &body).await.unwrap();
        let report: ReconcileResponse = assert_json(response, StatusCode::OK).await.unwrap();
        corrected += report.corrected;
        cursor = report.next_cursor;
        if cursor.is_none() {
            break;
        }
    }
    assert!(corrected >= 1);

    let response = server.get(&react_path(insight_id)).await.unwrap();
    let snapshot: SnapshotResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(snapshot.reaction_total, 0);
    assert_eq!(snapshot.reaction_counts["like"], 0);
}
