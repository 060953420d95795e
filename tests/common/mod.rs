//! Shared harness for the HTTP integration tests.
//!
//! Each `TestApp` owns a private in-memory SQLite database with all
//! migrations applied, and drives the real router with `oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use workout_api::api::{create_router, AppState};
use workout_api::config::Config;
use workout_api::infra::{Database, Persistence};
use workout_api::services::{CatalogService, Identity, ServiceContainer, Services};

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

pub struct TestApp {
    pub router: Router,
    pub services: Services,
    /// Direct store access for checking rows the API never exposes.
    pub persistence: Arc<Persistence>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A registered account and its token.
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub token: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut config = Config::new("sqlite::memory:", TEST_SECRET).expect("test config");
        // Every pooled connection to `sqlite::memory:` is its own database.
        config.database_max_connections = 1;

        let database = Arc::new(Database::connect(&config).await.expect("database"));
        let services = Services::from_connection(database.get_connection(), config.clone());
        let persistence = Arc::new(Persistence::new(database.get_connection()));
        let router = create_router(AppState::new(&services, database));

        Self {
            router,
            services,
            persistence,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-auth-token", token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Register through the API and return the issued token.
    pub async fn register(&self, name: &str) -> TestUser {
        let email = format!("{}@example.com", name);
        let response = self
            .post(
                "/api/users",
                None,
                json!({ "name": name, "email": email, "password": "123456" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "register {}: {:?}", name, response.body);

        let token = response.headers["x-auth-token"]
            .to_str()
            .expect("token header")
            .to_string();
        let id = response.body["_id"].as_str().expect("user id").to_string();

        TestUser { id, email, token }
    }

    /// Register, grant the admin flag, and log in again for a fresh token.
    pub async fn register_admin(&self, name: &str) -> TestUser {
        let user = self.register(name).await;
        self.services
            .users()
            .set_admin(&user.email, true)
            .await
            .expect("promote");

        let token = self.login(&user.email, "123456").await;
        TestUser { token, ..user }
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/login", None, json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "login: {:?}", response.body);
        response.body["jwt"].as_str().expect("jwt").to_string()
    }

    /// Seed one muscle and one exercise directly through the catalog service.
    /// Returns the exercise id.
    pub async fn seed_exercise(&self, muscle: &str, exercise: &str) -> String {
        let admin = Identity {
            user_id: uuid::Uuid::new_v4(),
            admin: true,
        };
        let catalog = self.services.catalog();
        let muscle = catalog
            .create_muscle(admin, muscle.to_string())
            .await
            .expect("muscle");
        let exercise = catalog
            .create_exercise(admin, exercise.to_string(), &muscle.id.to_string())
            .await
            .expect("exercise");
        exercise.id.to_string()
    }

    /// Create a workout for `token` and return its id.
    pub async fn create_workout(&self, token: &str, body: Value) -> String {
        let response = self.post("/api/workouts", Some(token), body).await;
        assert_eq!(response.status, StatusCode::OK, "create workout: {:?}", response.body);
        response.body["_id"].as_str().expect("workout id").to_string()
    }
}

/// Minimal valid completed-exercise body.
pub fn completed_exercise(exercise_id: &str) -> Value {
    json!({
        "exercise_id": exercise_id,
        "exercise_type": "cable",
        "sets": 3,
        "reps": 12
    })
}

/// Error code from a `{"error":{"code":..}}` body.
pub fn error_code(response: &TestResponse) -> &str {
    response.body["error"]["code"].as_str().unwrap_or_default()
}
