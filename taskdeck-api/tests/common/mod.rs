/// Common test utilities for integration tests
///
/// Shared infrastructure for the end-to-end procedure tests:
/// - Test database setup (pool + migrations)
/// - Router construction
/// - Request/response helpers

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::Config;
use tower::ServiceExt;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Sends a POST with a JSON body and returns status plus parsed body
    pub async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    /// Sends a GET and returns status plus parsed body
    pub async fn get(&self, path: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    /// Creates a user with a unique email and returns its id
    pub async fn create_user(&self, name: &str) -> Uuid {
        let (status, body) = self
            .post(
                "/rpc/create_user",
                serde_json::json!({
                    "name": name,
                    "email": format!("{}-{}@example.com", name, Uuid::new_v4()),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create_user failed: {}", body);

        body["id"].as_str().unwrap().parse().unwrap()
    }

    /// Removes rows created by a test: tasks first, then the user
    pub async fn cleanup_user(&self, user_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM tasks WHERE assigned_member_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
