/// Task procedures
///
/// Create/read/update/delete operations plus the filtered list query.
///
/// # Procedures
///
/// - `POST /rpc/create_task`: `{title, description?, deadline,
///   assigned_member_id, effort_spent?, status?, dependencies?}` → `Task`
/// - `POST /rpc/get_tasks`: optional `TaskFilter` body → `Task[]`
/// - `POST /rpc/get_task_by_id`: `{id}` → `Task` (404 if absent)
/// - `POST /rpc/update_task`: `{id, <any subset of fields>}` → updated
///   `Task`
/// - `POST /rpc/delete_task`: `{id}` → 204, idempotent (absent id is
///   success, not error)

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use crate::routes::double_option;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use taskdeck_shared::models::task::{CreateTask, Task, TaskFilter, TaskStatus, UpdateTask};
use taskdeck_shared::models::user::User;
use uuid::Uuid;
use validator::Validate;

/// Create task request
///
/// Omitted optionals take defaults: `effort_spent = 0`,
/// `status = todo`, `dependencies = []`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title (non-empty)
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Deadline (required)
    pub deadline: DateTime<Utc>,

    /// Assignee; must exist at creation time
    pub assigned_member_id: Uuid,

    /// Effort spent so far
    #[validate(range(min = 0.0, message = "Effort spent must be non-negative"))]
    pub effort_spent: Option<f32>,

    /// Initial status
    pub status: Option<TaskStatus>,

    /// Dependency references; stored opaquely, existence not validated
    pub dependencies: Option<Vec<String>>,
}

/// Get/delete-by-id request
#[derive(Debug, Clone, Deserialize)]
pub struct TaskIdRequest {
    /// Task ID
    pub id: Uuid,
}

/// Update task request
///
/// Only fields present in the input are changed; an explicit `null`
/// for `description` clears it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// Task ID
    pub id: Uuid,

    /// New title
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    /// New description; absent = untouched, null = cleared
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,

    /// New deadline
    pub deadline: Option<DateTime<Utc>>,

    /// New assignee
    pub assigned_member_id: Option<Uuid>,

    /// New effort spent
    #[validate(range(min = 0.0, message = "Effort spent must be non-negative"))]
    pub effort_spent: Option<f32>,

    /// New status
    pub status: Option<TaskStatus>,

    /// Replacement dependency list
    pub dependencies: Option<Vec<String>>,
}

/// Create task handler
///
/// The assignee is verified to exist before the insert; no task row is
/// created when the check fails.
///
/// # Errors
///
/// - 422: invalid title or negative effort
/// - 404: assignee does not exist
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    request.validate()?;

    // Verify that the assigned member exists
    let assignee = User::find_by_id(&state.db, request.assigned_member_id).await?;
    if assignee.is_none() {
        return Err(ApiError::NotFound(format!(
            "User with id {} does not exist",
            request.assigned_member_id
        )));
    }

    tracing::info!(
        title = %request.title,
        assigned_member_id = %request.assigned_member_id,
        "Creating new task"
    );

    let task = Task::create(
        &state.db,
        CreateTask {
            title: request.title,
            description: request.description,
            deadline: request.deadline,
            assigned_member_id: request.assigned_member_id,
            effort_spent: request.effort_spent.unwrap_or(0.0),
            status: request.status.unwrap_or_default(),
            dependencies: request.dependencies.unwrap_or_default(),
        },
    )
    .await?;

    tracing::info!(task_id = %task.id, status = ?task.status, "Task created successfully");

    Ok(Json(task))
}

/// Parses the optional filter body for `get_tasks`
///
/// An empty body and a JSON `null` both mean "no filter". Anything else
/// must deserialize as a `TaskFilter`.
fn parse_task_filter(body: &[u8]) -> Result<Option<TaskFilter>, serde_json::Error> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(body)
}

/// List tasks handler
///
/// Accepts an optional filter body; no body (or an empty filter)
/// returns all tasks in store-default order.
///
/// # Errors
///
/// - 400: body present but not a valid `TaskFilter`
pub async fn get_tasks(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<Vec<Task>>> {
    let filter = parse_task_filter(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid task filter: {}", e)))?;

    let tasks = Task::list(&state.db, filter.as_ref()).await?;
    Ok(Json(tasks))
}

/// Get task by id handler
///
/// # Errors
///
/// - 404: no task with the given id
pub async fn get_task_by_id(
    State(state): State<AppState>,
    Json(request): Json<TaskIdRequest>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, request.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task with id {} not found", request.id)))?;

    Ok(Json(task))
}

/// Update task handler
///
/// Partial update: only provided fields are changed. Any field except
/// `id` and `created_at` may be updated.
///
/// # Errors
///
/// - 422: invalid title or negative effort
/// - 404: no task with the given id
/// - 409: new assignee does not exist (foreign key)
pub async fn update_task(
    State(state): State<AppState>,
    Json(request): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    request.validate()?;

    let update = UpdateTask {
        title: request.title,
        description: request.description,
        deadline: request.deadline,
        assigned_member_id: request.assigned_member_id,
        effort_spent: request.effort_spent,
        status: request.status,
        dependencies: request.dependencies,
    };

    let task = Task::update(&state.db, request.id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Task with id {} not found", request.id)))?;

    tracing::info!(task_id = %task.id, "Task updated");

    Ok(Json(task))
}

/// Delete task handler
///
/// Idempotent: deleting a non-existent id succeeds silently.
pub async fn delete_task(
    State(state): State<AppState>,
    Json(request): Json<TaskIdRequest>,
) -> ApiResult<StatusCode> {
    let deleted = Task::delete(&state.db, request.id).await?;

    tracing::info!(task_id = %request.id, deleted, "Task delete processed");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateTaskRequest {
        CreateTaskRequest {
            title: "Write release notes".to_string(),
            description: None,
            deadline: Utc::now(),
            assigned_member_id: Uuid::new_v4(),
            effort_spent: None,
            status: None,
            dependencies: None,
        }
    }

    #[test]
    fn test_create_task_request_validation() {
        assert!(base_request().validate().is_ok());

        let empty_title = CreateTaskRequest {
            title: "".to_string(),
            ..base_request()
        };
        assert!(empty_title.validate().is_err());

        let negative_effort = CreateTaskRequest {
            effort_spent: Some(-1.5),
            ..base_request()
        };
        assert!(negative_effort.validate().is_err());

        let zero_effort = CreateTaskRequest {
            effort_spent: Some(0.0),
            ..base_request()
        };
        assert!(zero_effort.validate().is_ok());
    }

    #[test]
    fn test_create_task_request_accepts_arbitrary_dependency_strings() {
        // Dependencies are opaque identifier strings; existence and
        // format are deliberately not enforced
        let request: CreateTaskRequest = serde_json::from_str(
            r#"{
                "title": "t",
                "deadline": "2025-06-01T12:00:00Z",
                "assigned_member_id": "550e8400-e29b-41d4-a716-446655440000",
                "dependencies": ["not-a-uuid", "550e8400-e29b-41d4-a716-446655440000"]
            }"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.dependencies.unwrap().len(), 2);
    }

    #[test]
    fn test_update_task_request_description_tristate() {
        let absent: UpdateTaskRequest = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000"}"#,
        )
        .unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateTaskRequest = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "description": null}"#,
        )
        .unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: UpdateTaskRequest = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "description": "updated"}"#,
        )
        .unwrap();
        assert_eq!(set.description, Some(Some("updated".to_string())));
    }

    #[test]
    fn test_update_task_request_validates_present_fields_only() {
        let empty: UpdateTaskRequest = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000"}"#,
        )
        .unwrap();
        assert!(empty.validate().is_ok());

        let bad_title: UpdateTaskRequest = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "title": ""}"#,
        )
        .unwrap();
        assert!(bad_title.validate().is_err());

        let bad_effort: UpdateTaskRequest = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "effort_spent": -2.0}"#,
        )
        .unwrap();
        assert!(bad_effort.validate().is_err());
    }

    #[test]
    fn test_parse_task_filter_absent_body_means_no_filter() {
        assert!(parse_task_filter(b"").unwrap().is_none());
        assert!(parse_task_filter(b"null").unwrap().is_none());
    }

    #[test]
    fn test_parse_task_filter_accepts_valid_filter() {
        let filter = parse_task_filter(br#"{"status": "todo", "overdue_only": true}"#)
            .unwrap()
            .unwrap();
        assert_eq!(filter.status, Some(TaskStatus::Todo));
        assert_eq!(filter.overdue_only, Some(true));
    }

    #[test]
    fn test_parse_task_filter_rejects_malformed_input() {
        // An unknown status value must fail loudly rather than fall
        // back to an unfiltered listing
        assert!(parse_task_filter(br#"{"status": "bogus"}"#).is_err());
        assert!(parse_task_filter(b"not json").is_err());
        assert!(parse_task_filter(br#"{"deadline_before": "yesterday"}"#).is_err());
    }

    #[test]
    fn test_update_task_request_status_wire_values() {
        let request: UpdateTaskRequest = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "status": "in_progress"}"#,
        )
        .unwrap();
        assert_eq!(request.status, Some(TaskStatus::InProgress));

        // 'overdue' is settable only through an explicit update like this
        let request: UpdateTaskRequest = serde_json::from_str(
            r#"{"id": "550e8400-e29b-41d4-a716-446655440000", "status": "overdue"}"#,
        )
        .unwrap();
        assert_eq!(request.status, Some(TaskStatus::Overdue));
    }
}
