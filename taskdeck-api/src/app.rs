/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskdeck_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// Procedures are exposed as named routes under `/rpc`, one per
/// operation; queries without input are GET, everything else is POST
/// with a JSON body:
///
/// ```text
/// /
/// ├── /health                        # Health check
/// └── /rpc/
///     ├── POST /create_user
///     ├── GET  /get_users
///     ├── POST /get_user_by_id
///     ├── POST /update_user
///     ├── POST /delete_user
///     ├── POST /create_task
///     ├── POST /get_tasks
///     ├── POST /get_task_by_id
///     ├── POST /update_task
///     ├── POST /delete_task
///     └── GET  /get_dashboard_tasks
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (permissive; the API carries no auth surface)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route("/create_user", post(routes::users::create_user))
        .route("/get_users", get(routes::users::get_users))
        .route("/get_user_by_id", post(routes::users::get_user_by_id))
        .route("/update_user", post(routes::users::update_user))
        .route("/delete_user", post(routes::users::delete_user));

    let task_routes = Router::new()
        .route("/create_task", post(routes::tasks::create_task))
        .route("/get_tasks", post(routes::tasks::get_tasks))
        .route("/get_task_by_id", post(routes::tasks::get_task_by_id))
        .route("/update_task", post(routes::tasks::update_task))
        .route("/delete_task", post(routes::tasks::delete_task));

    let dashboard_routes = Router::new().route(
        "/get_dashboard_tasks",
        get(routes::dashboard::get_dashboard_tasks),
    );

    let rpc_routes = Router::new()
        .merge(user_routes)
        .merge(task_routes)
        .merge(dashboard_routes);

    Router::new()
        .merge(health_routes)
        .nest("/rpc", rpc_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
