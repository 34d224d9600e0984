//! Integration tests for analytics and progress tracking

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_average_daily_calories_over_logged_days() {
    let app = common::TestApp::new().await;
    let user = app.signup("avg").await;
    let food = app
        .insert_food(&format!("Test rice {}", uuid::Uuid::new_v4()), 200)
        .await;

    let today = Utc::now();
    for logged_at in [today - Duration::days(1), today - Duration::days(3)] {
        let (status, _) = app
            .post_auth(
                "/api/v1/nutrition/logs",
                &user.token,
                json!({
                    "foodId": food,
                    "servingSizeGrams": 100.0,
                    "mealType": "dinner",
                    "loggedAt": logged_at
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, stats) = app
        .get_auth("/api/v1/analytics/nutrition?days=7", &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["averageDailyCalories"], 200);
    assert_eq!(stats["totalMealsLogged"], 2);
    assert_eq!(stats["mostLoggedMealType"], "dinner");
    assert_eq!(stats["topFoods"][0]["count"], 2);
    assert_eq!(stats["weeklyTrend"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_empty_window_uses_fallbacks() {
    let app = common::TestApp::new().await;
    let user = app.signup("empty").await;

    let (status, nutrition) = app
        .get_auth("/api/v1/analytics/nutrition", &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(nutrition["averageDailyCalories"], 0);
    assert_eq!(nutrition["mostLoggedMealType"], "breakfast");

    let (status, workouts) = app
        .get_auth("/api/v1/analytics/workouts", &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(workouts["totalWorkouts"], 0);
    assert_eq!(workouts["mostActiveDay"], "Monday");
    assert!(workouts["popularExercises"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_window_out_of_range_is_invalid() {
    let app = common::TestApp::new().await;
    let user = app.signup("window").await;

    let (status, body) = app
        .get_auth("/api/v1/analytics/workouts?days=400", &user.token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_argument");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_workout_stats_counts_completed_sessions() {
    let app = common::TestApp::new().await;
    let user = app.signup("wstats").await;
    let squat = app.exercise_id("Squat").await;

    let started = Utc::now() - Duration::days(2);
    for _ in 0..2 {
        let (status, _) = app
            .post_auth(
                "/api/v1/workouts/sessions",
                &user.token,
                json!({
                    "name": "Legs",
                    "startedAt": started,
                    "completedAt": started + Duration::minutes(40),
                    "rating": 4,
                    "exercises": [{"exerciseId": squat, "setsCompleted": 5, "repsCompleted": 5}]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, stats) = app
        .get_auth("/api/v1/analytics/workouts?days=30", &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalWorkouts"], 2);
    assert_eq!(stats["totalDuration"], 80);
    assert_eq!(stats["averageDuration"], 40);
    assert_eq!(stats["workoutsThisWeek"], 2);
    assert_eq!(stats["popularExercises"][0]["exerciseName"], "Squat");
    assert_eq!(stats["popularExercises"][0]["count"], 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_overview_reports_weight_change() {
    let app = common::TestApp::new().await;
    let user = app.signup("overview").await;
    let today = Utc::now().date_naive();

    for (date, value) in [(today - Duration::days(40), 82.0), (today, 79.5)] {
        let (status, _) = app
            .post_auth(
                "/api/v1/progress",
                &user.token,
                json!({"dateMeasured": date, "measurementType": "Weight", "value": value, "unit": "kg"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, list) = app
        .get_auth("/api/v1/progress?measurement_type=weight", &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let measurements = list["measurements"].as_array().unwrap();
    assert_eq!(measurements.len(), 2);
    assert_eq!(measurements[0]["value"], 79.5);

    let (status, overview) = app
        .get_auth("/api/v1/analytics/overview", &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["progressStats"]["latestWeight"], 79.5);
    assert_eq!(overview["progressStats"]["weightChange30Days"], -2.5);
    assert_eq!(overview["progressStats"]["measurementTypes"], json!(["weight"]));
    assert_eq!(overview["workoutStats"]["totalWorkouts"], 0);
    assert_eq!(overview["nutritionStats"]["daysLogged"], 0);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_progress_value_out_of_range_is_invalid_argument() {
    let app = common::TestApp::new().await;
    let user = app.signup("bigvalue").await;

    let (status, body) = app
        .post_auth(
            "/api/v1/progress",
            &user.token,
            json!({"dateMeasured": Utc::now().date_naive(), "measurementType": "steps", "value": 1e12, "unit": "count"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_argument");
}
