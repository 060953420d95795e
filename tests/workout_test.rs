//! Integration tests for workouts and completed exercises.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use common::{completed_exercise, error_code, TestApp};
use workout_api::errors::AppError;
use workout_api::infra::UnitOfWork;
use workout_api::with_transaction;

fn uuid_of(raw: &str) -> uuid::Uuid {
    uuid::Uuid::parse_str(raw).expect("uuid")
}

fn parse_date(value: &Value) -> DateTime<Utc> {
    value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|d| d.with_timezone(&Utc))
        .expect("RFC 3339 date")
}

#[tokio::test]
async fn test_create_without_date_defaults_to_now() {
    let app = TestApp::spawn().await;
    let bob = app.register("bob").await;

    let response = app.post("/api/workouts", Some(&bob.token), json!({})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["_id"].is_string());
    assert_eq!(response.body["user_id"], bob.id.as_str());
    let age = Utc::now() - parse_date(&response.body["date"]);
    assert!(age.num_seconds().abs() < 60);
}

#[tokio::test]
async fn test_create_with_empty_body_and_explicit_date() {
    let app = TestApp::spawn().await;
    let bob = app.register("bob").await;

    let empty = app
        .request(Method::POST, "/api/workouts", Some(&bob.token), None)
        .await;
    assert_eq!(empty.status, StatusCode::OK);

    let dated = app
        .post(
            "/api/workouts",
            Some(&bob.token),
            json!({ "date": "2019-11-01T00:00:00.000Z" }),
        )
        .await;
    assert_eq!(dated.status, StatusCode::OK);
    assert_eq!(
        parse_date(&dated.body["date"]),
        "2019-11-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );

    let invalid = app
        .post("/api/workouts", Some(&bob.token), json!({ "date": "yesterday" }))
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_only_contains_own_workouts() {
    let app = TestApp::spawn().await;
    let bob = app.register("bob").await;
    let binky = app.register("binky").await;

    let first = app.create_workout(&bob.token, json!({})).await;
    let second = app.create_workout(&bob.token, json!({})).await;
    let foreign = app.create_workout(&binky.token, json!({})).await;

    let response = app.get("/api/workouts", Some(&bob.token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let ids: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, [first.as_str(), second.as_str()]);
    assert!(!ids.contains(&foreign.as_str()));
}

#[tokio::test]
async fn test_workout_routes_require_token_before_anything_else() {
    let app = TestApp::spawn().await;
    let bob = app.register("bob").await;
    let workout_id = app.create_workout(&bob.token, json!({})).await;
    let real = format!("/api/workouts/{}", workout_id);
    let real_entries = format!("{}/completed_exercises", real);

    let cases = [
        (Method::GET, "/api/workouts"),
        (Method::POST, "/api/workouts"),
        (Method::GET, "/api/workouts/1"),
        (Method::PUT, "/api/workouts/1"),
        (Method::DELETE, "/api/workouts/1"),
        (Method::POST, "/api/workouts/1/completed_exercises"),
        (Method::GET, real.as_str()),
        (Method::PUT, real.as_str()),
        (Method::DELETE, real.as_str()),
        (Method::POST, real_entries.as_str()),
    ];

    for (method, uri) in cases {
        for token in [None, Some(""), Some("not-a-token")] {
            let response = app
                .request(method.clone(), uri, token, Some(json!({ "date": "garbage" })))
                .await;
            assert_eq!(
                response.status,
                StatusCode::UNAUTHORIZED,
                "{} {} with {:?}",
                method,
                uri,
                token
            );
            assert_eq!(error_code(&response), "UNAUTHENTICATED");
        }
    }

    // Nothing was deleted by the unauthenticated attempts.
    let still_there = app.get(&real, Some(&bob.token)).await;
    assert_eq!(still_there.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_id_is_not_found_even_for_owner() {
    let app = TestApp::spawn().await;
    let bob = app.register("bob").await;
    app.create_workout(&bob.token, json!({})).await;

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let response = app
            .request(method.clone(), "/api/workouts/1", Some(&bob.token), Some(json!({})))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{}", method);
    }

    let entry = app
        .post(
            "/api/workouts/1/completed_exercises",
            Some(&bob.token),
            json!({}),
        )
        .await;
    assert_eq!(entry.status, StatusCode::NOT_FOUND);

    // Segments that do not even decode to UTF-8 are just as absent.
    for (method, uri) in [
        (Method::GET, "/api/workouts/%FF"),
        (Method::PUT, "/api/workouts/%FF"),
        (Method::DELETE, "/api/workouts/%FF"),
        (Method::POST, "/api/workouts/%FF/completed_exercises"),
    ] {
        let response = app
            .request(method.clone(), uri, Some(&bob.token), Some(json!({})))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{} {}", method, uri);
        assert_eq!(error_code(&response), "NOT_FOUND");
    }

    let absent = app
        .get(&format!("/api/workouts/{}", uuid::Uuid::new_v4()), Some(&bob.token))
        .await;
    assert_eq!(absent.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_foreign_workout_is_forbidden_and_untouched() {
    let app = TestApp::spawn().await;
    let exercise_id = app.seed_exercise("legs", "squat").await;
    let bob = app.register("bob").await;
    let binky = app.register_admin("binky").await;
    let workout_id = app
        .create_workout(&bob.token, json!({ "date": "2019-11-01" }))
        .await;
    let uri = format!("/api/workouts/{}", workout_id);

    let read = app.get(&uri, Some(&binky.token)).await;
    assert_eq!(read.status, StatusCode::FORBIDDEN);
    assert!(read.body.get("_id").is_none());

    let update = app
        .request(Method::PUT, &uri, Some(&binky.token), Some(json!({ "date": "2020-01-01" })))
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);

    // Access is decided before the body is looked at.
    let bad_body_update = app
        .request(Method::PUT, &uri, Some(&binky.token), Some(json!({ "date": "nope" })))
        .await;
    assert_eq!(bad_body_update.status, StatusCode::FORBIDDEN);

    let entry = app
        .post(
            &format!("{}/completed_exercises", uri),
            Some(&binky.token),
            completed_exercise(&exercise_id),
        )
        .await;
    assert_eq!(entry.status, StatusCode::FORBIDDEN);

    let delete = app.request(Method::DELETE, &uri, Some(&binky.token), None).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    let owner_view = app.get(&uri, Some(&bob.token)).await;
    assert_eq!(owner_view.status, StatusCode::OK);
    assert_eq!(
        parse_date(&owner_view.body["date"]),
        "2019-11-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
    assert_eq!(owner_view.body["exercises"], json!([]));
}

#[tokio::test]
async fn test_update_changes_only_the_date() {
    let app = TestApp::spawn().await;
    let bob = app.register("bob").await;
    let workout_id = app.create_workout(&bob.token, json!({})).await;
    let uri = format!("/api/workouts/{}", workout_id);

    let updated = app
        .request(
            Method::PUT,
            &uri,
            Some(&bob.token),
            Some(json!({ "date": "2020-02-02T10:30:00Z", "user_id": "someone-else" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["user_id"], bob.id.as_str());
    assert_eq!(
        parse_date(&updated.body["date"]),
        "2020-02-02T10:30:00Z".parse::<DateTime<Utc>>().unwrap()
    );

    for body in [None, Some(json!({})), Some(json!({ "date": "not a date" }))] {
        let response = app
            .request(Method::PUT, &uri, Some(&bob.token), body.clone())
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{:?}", body);
    }
}

#[tokio::test]
async fn test_completed_exercise_defaults_and_join() {
    let app = TestApp::spawn().await;
    let exercise_id = app.seed_exercise("chest", "cable crossover").await;
    let bob = app.register("bob").await;
    let workout_id = app.create_workout(&bob.token, json!({})).await;
    let other_workout = app.create_workout(&bob.token, json!({})).await;

    let mut body = completed_exercise(&exercise_id);
    body["load"] = json!(225);
    body["workout_id"] = json!(other_workout);

    let entry = app
        .post(
            &format!("/api/workouts/{}/completed_exercises", workout_id),
            Some(&bob.token),
            body,
        )
        .await;
    assert_eq!(entry.status, StatusCode::OK);
    assert_eq!(entry.body["workout_id"], workout_id.as_str());
    assert_eq!(entry.body["exercise_id"], exercise_id.as_str());
    assert_eq!(entry.body["exercise_type"], "cable");
    assert_eq!(entry.body["sets"], 3);
    assert_eq!(entry.body["reps"], 12);
    assert_eq!(entry.body["load"], 225.0);
    assert_eq!(entry.body["unilateral"], false);
    assert_eq!(entry.body["mum"], false);

    // Trailing slash variant used by older clients.
    let second = app
        .post(
            &format!("/api/workouts/{}/completed_exercises/", workout_id),
            Some(&bob.token),
            json!({
                "exercise_id": exercise_id,
                "exercise_type": "free weight",
                "sets": 5,
                "reps": 5,
                "unilateral": true
            }),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["unilateral"], true);

    let workout = app
        .get(&format!("/api/workouts/{}", workout_id), Some(&bob.token))
        .await;
    assert_eq!(workout.status, StatusCode::OK);
    let exercises = workout.body["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0]["exercise_id"]["_id"], exercise_id.as_str());
    assert_eq!(exercises[0]["exercise_id"]["name"], "cable crossover");
    assert!(exercises[0]["exercise_id"]["muscle_id"].is_string());

    let listed = app.get("/api/workouts", Some(&bob.token)).await;
    let listed = listed.body.as_array().unwrap();
    assert_eq!(listed[0]["exercises"].as_array().unwrap().len(), 2);
    assert_eq!(listed[1]["exercises"], json!([]));
}

#[tokio::test]
async fn test_completed_exercise_validation() {
    let app = TestApp::spawn().await;
    let exercise_id = app.seed_exercise("back", "row").await;
    let bob = app.register("bob").await;
    let workout_id = app.create_workout(&bob.token, json!({})).await;
    let uri = format!("/api/workouts/{}/completed_exercises", workout_id);

    let unknown = app
        .post(
            &uri,
            Some(&bob.token),
            completed_exercise(&uuid::Uuid::new_v4().to_string()),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let malformed = app
        .post(&uri, Some(&bob.token), completed_exercise("1"))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    for field in ["sets", "reps", "exercise_type"] {
        let mut body = completed_exercise(&exercise_id);
        body.as_object_mut().unwrap().remove(field);
        let response = app.post(&uri, Some(&bob.token), body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "missing {}", field);
    }

    let mut zero_sets = completed_exercise(&exercise_id);
    zero_sets["sets"] = json!(0);
    let response = app.post(&uri, Some(&bob.token), zero_sets).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mut unknown_type = completed_exercise(&exercise_id);
    unknown_type["exercise_type"] = json!("kettlebell");
    let response = app.post(&uri, Some(&bob.token), unknown_type).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let workout = app
        .get(&format!("/api/workouts/{}", workout_id), Some(&bob.token))
        .await;
    assert_eq!(workout.body["exercises"], json!([]));
}

#[tokio::test]
async fn test_delete_cascades_to_completed_exercises() {
    let app = TestApp::spawn().await;
    let exercise_id = app.seed_exercise("shoulders", "press").await;
    let bob = app.register("bob").await;
    let doomed = app.create_workout(&bob.token, json!({})).await;
    let kept = app.create_workout(&bob.token, json!({})).await;

    for workout_id in [&doomed, &doomed, &kept] {
        let response = app
            .post(
                &format!("/api/workouts/{}/completed_exercises", workout_id),
                Some(&bob.token),
                completed_exercise(&exercise_id),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let uri = format!("/api/workouts/{}", doomed);
    let deleted = app.request(Method::DELETE, &uri, Some(&bob.token), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["_id"], doomed.as_str());
    assert_eq!(deleted.body["exercises"].as_array().unwrap().len(), 2);

    let gone = app.get(&uri, Some(&bob.token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let listed = app.get("/api/workouts", Some(&bob.token)).await;
    let listed = listed.body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["_id"], kept.as_str());
    assert_eq!(listed[0]["exercises"].as_array().unwrap().len(), 1);

    let orphans = app
        .persistence
        .completed_exercises()
        .list_by_workouts(&[uuid_of(&doomed)])
        .await
        .unwrap();
    assert!(orphans.is_empty());
}

#[tokio::test]
async fn test_failed_cascade_rolls_back_entry_deletion() {
    let app = TestApp::spawn().await;
    let exercise_id = app.seed_exercise("arms", "curl").await;
    let bob = app.register("bob").await;
    let workout_id = app.create_workout(&bob.token, json!({})).await;
    for _ in 0..2 {
        let response = app
            .post(
                &format!("/api/workouts/{}/completed_exercises", workout_id),
                Some(&bob.token),
                completed_exercise(&exercise_id),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let id = uuid_of(&workout_id);
    let result: Result<(), AppError> = with_transaction!(app.persistence, |ctx| {
        let removed = ctx.completed_exercises().delete_by_workouts(&[id]).await?;
        assert_eq!(removed, 2);
        Err(AppError::internal("workout delete failed"))
    });
    assert!(matches!(result, Err(AppError::Internal(_))));

    let entries = app
        .persistence
        .completed_exercises()
        .list_by_workouts(&[id])
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);

    let workout = app
        .get(&format!("/api/workouts/{}", workout_id), Some(&bob.token))
        .await;
    assert_eq!(workout.status, StatusCode::OK);
    assert_eq!(workout.body["exercises"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_same_instant_workouts_keep_insertion_order() {
    let app = TestApp::spawn().await;
    let bob = app.register("bob").await;
    let owner = uuid_of(&bob.id);
    let date = "2019-11-01T00:00:00Z".parse().unwrap();

    let workouts = app.persistence.workouts();
    let mut created = Vec::new();
    for _ in 0..25 {
        created.push(workouts.create(owner, date).await.unwrap().id);
    }

    let listed: Vec<_> = workouts
        .list_by_owner(owner)
        .await
        .unwrap()
        .into_iter()
        .map(|w| w.id)
        .collect();
    assert_eq!(listed, created);
}
