/// User procedures
///
/// Create/read/update/delete operations for team members.
///
/// # Procedures
///
/// - `POST /rpc/create_user`: `{name, email}` → `User`
/// - `GET  /rpc/get_users`: no body → `User[]`
/// - `POST /rpc/get_user_by_id`: `{id}` → `User` (404 if absent)
/// - `POST /rpc/update_user`: `{id, name?, email?}` → updated `User`
/// - `POST /rpc/delete_user`: `{id}` → 204 (409 while tasks reference
///   the user, 404 if absent)

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use taskdeck_shared::models::task::Task;
use taskdeck_shared::models::user::{CreateUser, UpdateUser, User};
use uuid::Uuid;
use validator::Validate;

/// Create user request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name (non-empty)
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    /// Email address (unique across users)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Get/delete-by-id request
#[derive(Debug, Clone, Deserialize)]
pub struct UserIdRequest {
    /// User ID
    pub id: Uuid,
}

/// Update user request
///
/// Only fields present in the input are changed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// User ID
    pub id: Uuid,

    /// New display name
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Create user handler
///
/// # Errors
///
/// - 422: invalid name or email
/// - 409: email already in use
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<Json<User>> {
    request.validate()?;

    tracing::info!(email = %request.email, "Creating new user");

    let user = User::create(
        &state.db,
        CreateUser {
            name: request.name,
            email: request.email,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User created successfully");

    Ok(Json(user))
}

/// List users handler
pub async fn get_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

/// Get user by id handler
///
/// # Errors
///
/// - 404: no user with the given id
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Json(request): Json<UserIdRequest>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, request.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User with ID {} not found", request.id)))?;

    Ok(Json(user))
}

/// Update user handler
///
/// Partial update: only provided fields are changed. An update with no
/// fields returns the current row.
///
/// # Errors
///
/// - 422: invalid name or email
/// - 404: no user with the given id
/// - 409: new email already in use
pub async fn update_user(
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    request.validate()?;

    let update = UpdateUser {
        name: request.name,
        email: request.email,
    };

    let user = User::update(&state.db, request.id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User with id {} not found", request.id)))?;

    tracing::info!(user_id = %user.id, "User updated");

    Ok(Json(user))
}

/// Delete user handler
///
/// Deletion is blocked while any task references the user as assignee.
///
/// # Errors
///
/// - 409: user still has assigned tasks
/// - 404: no user with the given id
pub async fn delete_user(
    State(state): State<AppState>,
    Json(request): Json<UserIdRequest>,
) -> ApiResult<StatusCode> {
    let assigned = Task::count_assigned_to(&state.db, request.id).await?;
    if assigned > 0 {
        return Err(ApiError::Conflict(
            "Cannot delete user with assigned tasks".to_string(),
        ));
    }

    let deleted = User::delete(&state.db, request.id).await?;
    if !deleted {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    tracing::info!(user_id = %request.id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_validation() {
        let valid = CreateUserRequest {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_name = CreateUserRequest {
            name: "".to_string(),
            email: "ada@example.com".to_string(),
        };
        assert!(empty_name.validate().is_err());

        let bad_email = CreateUserRequest {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_update_user_request_absent_fields_pass_validation() {
        let update = UpdateUserRequest {
            id: Uuid::new_v4(),
            name: None,
            email: None,
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_user_request_validates_present_fields() {
        let update = UpdateUserRequest {
            id: Uuid::new_v4(),
            name: Some("".to_string()),
            email: None,
        };
        assert!(update.validate().is_err());

        let update = UpdateUserRequest {
            id: Uuid::new_v4(),
            name: None,
            email: Some("nope".to_string()),
        };
        assert!(update.validate().is_err());
    }
}
