//! Tests for the glide module.

use tempfile::TempDir;

use super::*;
use crate::{
    models::{Priority, SessionFilter},
    params::{
        AddGoal, Id, JotThought, ListGoals, ListThoughts, ReportQuery, StartPomodoro,
        StatsQuery, TagGoal, UntagGoal, UpdateGoal,
    },
    pomodoro::PomodoroStatus,
    stats::StatsRange,
};

/// Helper function to create a test instance
async fn create_test_glide() -> (TempDir, Glide) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let glide = GlideBuilder::new()
        .with_base_dir(Some(temp_dir.path()))
        .build()
        .await
        .expect("Failed to create glide");
    (temp_dir, glide)
}

async fn add_goal(glide: &Glide, title: &str, priority: Priority) -> crate::models::Goal {
    glide
        .add_goal(&AddGoal {
            title: title.to_string(),
            priority,
            ..Default::default()
        })
        .await
        .expect("Failed to add goal")
}

#[tokio::test]
async fn test_builder_uses_base_dir_and_defaults() {
    let (temp_dir, glide) = create_test_glide().await;
    assert_eq!(glide.paths().base_dir(), temp_dir.path());
    assert_eq!(glide.config().pomodoro_duration_minutes, 25);
}

#[tokio::test]
async fn test_goal_lifecycle() {
    let (_temp_dir, glide) = create_test_glide().await;

    let goal = add_goal(&glide, "Learn Rust", Priority::High).await;
    assert!(!goal.id.is_empty());

    let fetched = glide
        .get_goal(&Id { id: goal.id.clone() })
        .await
        .expect("Failed to get goal");
    assert_eq!(fetched, goal);

    let archived = glide
        .archive_goal(&Id { id: goal.id.clone() })
        .await
        .expect("Failed to archive goal");
    assert!(archived.archived);

    let err = glide
        .archive_goal(&Id { id: goal.id.clone() })
        .await
        .expect_err("archiving twice must fail");
    assert!(matches!(err, GlideError::AlreadyArchived { .. }));

    let restored = glide
        .restore_goal(&Id { id: goal.id.clone() })
        .await
        .expect("Failed to restore goal");
    assert!(!restored.archived);
    assert_eq!(restored.title, goal.title);
    assert_eq!(restored.priority, goal.priority);
    assert_eq!(restored.tags, goal.tags);
    assert_eq!(restored.created_at, goal.created_at);

    let err = glide
        .restore_goal(&Id { id: goal.id.clone() })
        .await
        .expect_err("restoring an active goal must fail");
    assert!(matches!(err, GlideError::NotArchived { .. }));
}

#[tokio::test]
async fn test_update_goal_and_clear_deadline() {
    let (_temp_dir, glide) = create_test_glide().await;
    let goal = glide
        .add_goal(&AddGoal {
            title: "Ship".to_string(),
            deadline: Some(jiff::civil::date(2030, 1, 1)),
            ..Default::default()
        })
        .await
        .expect("Failed to add goal");

    let updated = glide
        .update_goal(&UpdateGoal {
            id: goal.id.clone(),
            title: Some("Ship it".to_string()),
            priority: Some(Priority::Low),
            ..Default::default()
        })
        .await
        .expect("Failed to update goal");
    assert_eq!(updated.title, "Ship it");
    assert_eq!(updated.priority, Priority::Low);
    assert_eq!(updated.deadline, goal.deadline);

    let cleared = glide
        .update_goal(&UpdateGoal {
            id: goal.id.clone(),
            clear_deadline: true,
            ..Default::default()
        })
        .await
        .expect("Failed to clear deadline");
    assert_eq!(cleared.deadline, None);

    let err = glide
        .update_goal(&UpdateGoal {
            id: goal.id.clone(),
            title: Some("   ".to_string()),
            ..Default::default()
        })
        .await
        .expect_err("blank title must fail");
    assert!(matches!(err, GlideError::Validation { .. }));
}

#[tokio::test]
async fn test_list_goals_filters_and_order() {
    let (_temp_dir, glide) = create_test_glide().await;
    let low = add_goal(&glide, "Low", Priority::Low).await;
    let high = add_goal(&glide, "High", Priority::High).await;
    let archived = add_goal(&glide, "Gone", Priority::High).await;
    glide
        .archive_goal(&Id {
            id: archived.id.clone(),
        })
        .await
        .expect("Failed to archive goal");
    glide
        .add_tags(&TagGoal {
            id: low.id.clone(),
            tags: vec!["Home".to_string(), "chores".to_string()],
        })
        .await
        .expect("Failed to tag goal");

    let active = glide
        .list_goals(&ListGoals::default())
        .await
        .expect("Failed to list goals");
    let titles: Vec<_> = active.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["High", "Low"]);

    let all = glide
        .list_goals(&ListGoals {
            all: true,
            ..Default::default()
        })
        .await
        .expect("Failed to list goals");
    assert_eq!(all.len(), 3);
    assert_eq!(all.last().map(|g| g.id.as_str()), Some(archived.id.as_str()));

    let tagged = glide
        .list_goals(&ListGoals {
            tags: vec!["home".to_string(), "chores".to_string()],
            ..Default::default()
        })
        .await
        .expect("Failed to list goals");
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].id, low.id);

    let high_only = glide
        .list_goals(&ListGoals {
            priority: Some(Priority::High),
            ..Default::default()
        })
        .await
        .expect("Failed to list goals");
    assert_eq!(high_only.len(), 1);
    assert_eq!(high_only[0].id, high.id);
}

#[tokio::test]
async fn test_tags() {
    let (_temp_dir, glide) = create_test_glide().await;
    let goal = add_goal(&glide, "Tagged", Priority::Medium).await;
    let other = add_goal(&glide, "Other", Priority::Medium).await;

    let tagged = glide
        .add_tags(&TagGoal {
            id: goal.id.clone(),
            tags: vec!["b".to_string(), "a".to_string()],
        })
        .await
        .expect("Failed to tag goal");
    assert_eq!(tagged.tags, vec!["a", "b"]);

    glide
        .add_tags(&TagGoal {
            id: other.id.clone(),
            tags: vec!["a".to_string()],
        })
        .await
        .expect("Failed to tag goal");

    let err = glide
        .add_tags(&TagGoal {
            id: goal.id.clone(),
            tags: vec!["not valid!".to_string()],
        })
        .await
        .expect_err("invalid tag must fail");
    assert!(matches!(err, GlideError::Validation { .. }));

    let untouched = glide
        .remove_tag(&UntagGoal {
            id: goal.id.clone(),
            tag: "missing".to_string(),
        })
        .await
        .expect("Removing an absent tag is a no-op");
    assert_eq!(untouched.tags, vec!["a", "b"]);

    let removed = glide
        .remove_tag(&UntagGoal {
            id: goal.id.clone(),
            tag: "a".to_string(),
        })
        .await
        .expect("Failed to remove tag");
    assert_eq!(removed.tags, vec!["b"]);

    let counts = glide.all_tags().await.expect("Failed to count tags");
    assert_eq!(counts, vec![("a".to_string(), 1), ("b".to_string(), 1)]);
}

#[tokio::test]
async fn test_pomodoro_through_facade() {
    let (_temp_dir, glide) = create_test_glide().await;
    let goal = add_goal(&glide, "Focus", Priority::High).await;

    assert_eq!(
        glide.pomodoro_status().await.expect("status"),
        PomodoroStatus::Idle
    );

    let started = glide
        .start_pomodoro(&StartPomodoro {
            goal_id: Some(goal.id.clone()),
            duration_minutes: None,
        })
        .await
        .expect("Failed to start");
    assert_eq!(started.session.planned_duration_secs, 25 * 60);
    assert_eq!(started.recovered, None);

    assert!(matches!(
        glide.pomodoro_status().await.expect("status"),
        PomodoroStatus::Running { .. }
    ));

    let err = glide
        .start_pomodoro(&StartPomodoro::default())
        .await
        .expect_err("second start must fail");
    assert!(matches!(err, GlideError::AlreadyRunning { .. }));

    let session = glide.stop_pomodoro().await.expect("Failed to stop");
    assert_eq!(session.goal_id.as_deref(), Some(goal.id.as_str()));
    assert!(session.completed);

    let err = glide
        .stop_pomodoro()
        .await
        .expect_err("stop while idle must fail");
    assert!(matches!(err, GlideError::NoActiveSession));

    let sessions = glide
        .list_sessions(SessionFilter::default())
        .await
        .expect("Failed to list sessions");
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn test_start_for_archived_or_unknown_goal() {
    let (_temp_dir, glide) = create_test_glide().await;
    let goal = add_goal(&glide, "Old", Priority::Low).await;
    glide
        .archive_goal(&Id { id: goal.id.clone() })
        .await
        .expect("Failed to archive goal");

    let err = glide
        .start_pomodoro(&StartPomodoro {
            goal_id: Some(goal.id.clone()),
            duration_minutes: Some(25),
        })
        .await
        .expect_err("archived goal must be rejected");
    assert!(matches!(err, GlideError::AlreadyArchived { .. }));

    let err = glide
        .start_pomodoro(&StartPomodoro {
            goal_id: Some("nope".to_string()),
            duration_minutes: Some(25),
        })
        .await
        .expect_err("unknown goal must be rejected");
    assert!(matches!(err, GlideError::NotFound { .. }));

    let err = glide
        .start_pomodoro(&StartPomodoro {
            goal_id: None,
            duration_minutes: Some(0),
        })
        .await
        .expect_err("zero duration must be rejected");
    assert!(matches!(err, GlideError::Validation { .. }));

    assert_eq!(
        glide.pomodoro_status().await.expect("status"),
        PomodoroStatus::Idle
    );
}

#[tokio::test]
async fn test_thoughts() {
    let (_temp_dir, glide) = create_test_glide().await;
    let goal = add_goal(&glide, "Think", Priority::Medium).await;

    let first = glide
        .jot_thought(&JotThought {
            text: "  first idea ".to_string(),
            goal_id: Some(goal.id.clone()),
        })
        .await
        .expect("Failed to jot");
    assert_eq!(first.text, "first idea");
    glide
        .jot_thought(&JotThought {
            text: "unattached".to_string(),
            goal_id: None,
        })
        .await
        .expect("Failed to jot");

    let for_goal = glide
        .list_thoughts(&ListThoughts {
            goal_id: Some(goal.id.clone()),
            limit: None,
        })
        .await
        .expect("Failed to list thoughts");
    assert_eq!(for_goal.len(), 1);

    let limited = glide
        .list_thoughts(&ListThoughts {
            goal_id: None,
            limit: Some(1),
        })
        .await
        .expect("Failed to list thoughts");
    assert_eq!(limited.len(), 1);

    let err = glide
        .jot_thought(&JotThought {
            text: "x".to_string(),
            goal_id: Some("missing".to_string()),
        })
        .await
        .expect_err("unknown goal must fail");
    assert!(matches!(err, GlideError::NotFound { .. }));

    glide
        .archive_goal(&Id { id: goal.id.clone() })
        .await
        .expect("Failed to archive goal");
    let err = glide
        .jot_thought(&JotThought {
            text: "late".to_string(),
            goal_id: Some(goal.id.clone()),
        })
        .await
        .expect_err("archived goal must fail");
    assert!(matches!(err, GlideError::AlreadyArchived { .. }));

    let removed = glide
        .remove_thought(&Id { id: first.id.clone() })
        .await
        .expect("Failed to remove thought");
    assert_eq!(removed.id, first.id);
    let err = glide
        .remove_thought(&Id { id: first.id })
        .await
        .expect_err("second removal must fail");
    assert!(matches!(err, GlideError::NotFound { .. }));
}

#[tokio::test]
async fn test_remove_goal_keeps_sessions() {
    let (_temp_dir, glide) = create_test_glide().await;
    let goal = add_goal(&glide, "Temporary", Priority::Medium).await;
    glide
        .start_pomodoro(&StartPomodoro {
            goal_id: Some(goal.id.clone()),
            duration_minutes: Some(1),
        })
        .await
        .expect("Failed to start");
    glide.stop_pomodoro().await.expect("Failed to stop");

    glide
        .remove_goal(&Id { id: goal.id.clone() })
        .await
        .expect("Failed to remove goal");
    let err = glide
        .get_goal(&Id { id: goal.id.clone() })
        .await
        .expect_err("removed goal must be gone");
    assert!(matches!(err, GlideError::NotFound { .. }));

    let sessions = glide
        .list_sessions(SessionFilter::default())
        .await
        .expect("Failed to list sessions");
    assert_eq!(sessions.len(), 1);

    let report = glide
        .report(&ReportQuery {
            range: StatsRange::AllTime,
            top_goals: 5,
        })
        .await
        .expect("Failed to build report");
    assert_eq!(report.top_goals.len(), 1);
    assert_eq!(report.top_goals[0].title, None);
}

#[tokio::test]
async fn test_stats_summary() {
    let (_temp_dir, glide) = create_test_glide().await;
    let empty = glide
        .stats(&StatsQuery {
            range: StatsRange::AllTime,
            ..Default::default()
        })
        .await
        .expect("Failed to compute stats");
    assert_eq!(empty.totals.session_count, 0);
    assert!(empty.buckets.is_empty());
    assert_eq!(empty.most_productive_weekday, None);

    let week = glide
        .stats(&StatsQuery::default())
        .await
        .expect("Failed to compute stats");
    assert_eq!(week.buckets.len(), 7);
    assert_eq!(week.current_streak, 0);
}
