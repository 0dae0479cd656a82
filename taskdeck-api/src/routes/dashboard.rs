/// Dashboard procedure
///
/// Produces the bucketed dashboard view of all tasks whose assignee
/// still resolves to a user.
///
/// # Endpoint
///
/// ```text
/// GET /rpc/get_dashboard_tasks
/// ```
///
/// # Response
///
/// ```json
/// {
///   "overdue": [...],
///   "nearingDeadline": [...],
///   "inProgress": [...],
///   "total": 12
/// }
/// ```

use crate::app::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use chrono::Utc;
use taskdeck_shared::dashboard::{categorize_tasks, DashboardTasks};
use taskdeck_shared::models::task::Task;

/// Dashboard handler
///
/// Fetches tasks joined with their assignee and categorizes them
/// relative to the current instant. The reference `now` is read once
/// here and passed down, keeping the categorizer itself deterministic.
pub async fn get_dashboard_tasks(
    State(state): State<AppState>,
) -> ApiResult<Json<DashboardTasks>> {
    let tasks = Task::list_with_assignee(&state.db).await?;
    let buckets = categorize_tasks(tasks, Utc::now());

    tracing::debug!(
        total = buckets.total,
        overdue = buckets.overdue.len(),
        nearing = buckets.nearing_deadline.len(),
        in_progress = buckets.in_progress.len(),
        "Dashboard computed"
    );

    Ok(Json(buckets))
}
