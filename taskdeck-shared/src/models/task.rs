/// Task model and database operations
///
/// This module provides the Task model, the status enum, and the
/// composable list filter. Tasks are the core entity of Taskdeck.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in_progress', 'done', 'overdue');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     description TEXT,
///     deadline TIMESTAMPTZ NOT NULL,
///     assigned_member_id UUID NOT NULL REFERENCES users(id),
///     effort_spent REAL NOT NULL DEFAULT 0,
///     status task_status NOT NULL DEFAULT 'todo',
///     dependencies JSONB NOT NULL DEFAULT '[]',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{Task, CreateTask, TaskStatus};
/// use taskdeck_shared::db::pool::{create_pool, DatabaseConfig};
/// use chrono::{Duration, Utc};
/// use uuid::Uuid;
///
/// # async fn example(assignee: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     title: "Ship release".to_string(),
///     description: Some("Tag and publish v1.2".to_string()),
///     deadline: Utc::now() + Duration::days(7),
///     assigned_member_id: assignee,
///     effort_spent: 0.0,
///     status: TaskStatus::Todo,
///     dependencies: vec![],
/// }).await?;
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, title, description, deadline, assigned_member_id, \
     effort_spent, status, dependencies, created_at";

/// Task status
///
/// `Overdue` is a storable value but is never assigned automatically;
/// it can only be set by an explicit update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Todo,

    /// Actively being worked on
    InProgress,

    /// Finished; excluded from deadline buckets on the dashboard
    Done,

    /// Explicitly marked overdue (never set by the system itself)
    Overdue,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

impl TaskStatus {
    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Overdue => "overdue",
        }
    }
}

/// Task model representing a unit of work
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title (non-empty)
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Deadline used by the dashboard categorization
    pub deadline: DateTime<Utc>,

    /// The user this task is assigned to
    ///
    /// Verified to exist at creation time; later user deletion is
    /// blocked while this reference exists.
    pub assigned_member_id: Uuid,

    /// Effort spent so far (non-negative)
    pub effort_spent: f32,

    /// Current status
    pub status: TaskStatus,

    /// Ordered list of task-id strings this task depends on
    ///
    /// Stored opaquely: uniqueness, existence, and acyclicity are not
    /// enforced.
    pub dependencies: Json<Vec<String>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Deadline (required)
    pub deadline: DateTime<Utc>,

    /// Assignee; must exist at creation time
    pub assigned_member_id: Uuid,

    /// Initial effort spent (default 0)
    #[serde(default)]
    pub effort_spent: f32,

    /// Initial status (default todo)
    #[serde(default)]
    pub status: TaskStatus,

    /// Dependency references (default empty)
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Input for updating a task
///
/// All fields are optional. Only set fields are written; `description`
/// distinguishes "absent" (leave untouched) from "present null" (clear).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description (use Some(None) to clear)
    pub description: Option<Option<String>>,

    /// New deadline
    pub deadline: Option<DateTime<Utc>>,

    /// New assignee
    pub assigned_member_id: Option<Uuid>,

    /// New effort spent
    pub effort_spent: Option<f32>,

    /// New status
    pub status: Option<TaskStatus>,

    /// Replacement dependency list
    pub dependencies: Option<Vec<String>>,
}

impl UpdateTask {
    /// Returns true when no field is set, i.e. the update is a no-op
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.assigned_member_id.is_none()
            && self.effort_spent.is_none()
            && self.status.is_none()
            && self.dependencies.is_none()
    }
}

/// Filter criteria for listing tasks
///
/// Specified predicates are AND-composed; unspecified fields impose no
/// constraint. An empty filter returns all tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Exact status match
    pub status: Option<TaskStatus>,

    /// Exact assignee match
    pub assigned_member_id: Option<Uuid>,

    /// When true, adds `deadline < now` (wall clock at query execution)
    pub overdue_only: Option<bool>,

    /// Strict upper bound on deadline
    pub deadline_before: Option<DateTime<Utc>>,

    /// Strict lower bound on deadline
    pub deadline_after: Option<DateTime<Utc>>,
}

impl TaskFilter {
    /// Returns true when no predicate is specified
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.assigned_member_id.is_none()
            && !self.overdue_only.unwrap_or(false)
            && self.deadline_before.is_none()
            && self.deadline_after.is_none()
    }

    /// Builds the WHERE clause for the specified predicates
    ///
    /// Placeholders are numbered from $1 in the same order the binds are
    /// applied in [`Task::list`]. Returns an empty string for an empty
    /// filter.
    fn where_clause(&self) -> String {
        let mut conditions = Vec::new();
        let mut bind_count = 0;

        if self.status.is_some() {
            bind_count += 1;
            conditions.push(format!("status = ${}", bind_count));
        }
        if self.assigned_member_id.is_some() {
            bind_count += 1;
            conditions.push(format!("assigned_member_id = ${}", bind_count));
        }
        if self.overdue_only.unwrap_or(false) {
            bind_count += 1;
            conditions.push(format!("deadline < ${}", bind_count));
        }
        if self.deadline_before.is_some() {
            bind_count += 1;
            conditions.push(format!("deadline < ${}", bind_count));
        }
        if self.deadline_after.is_some() {
            bind_count += 1;
            conditions.push(format!("deadline > ${}", bind_count));
        }

        if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        }
    }
}

impl Task {
    /// Creates a new task
    ///
    /// Callers must verify the assignee exists beforehand; the foreign
    /// key rejects unknown assignees but with a less descriptive error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, description, deadline, assigned_member_id, \
             effort_spent, status, dependencies) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            TASK_COLUMNS
        );

        let task = sqlx::query_as::<_, Task>(&query)
            .bind(data.title)
            .bind(data.description)
            .bind(data.deadline)
            .bind(data.assigned_member_id)
            .bind(data.effort_spent)
            .bind(data.status)
            .bind(Json(data.dependencies))
            .fetch_one(pool)
            .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);

        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(task)
    }

    /// Lists tasks matching an optional filter
    ///
    /// Specified predicates are AND-composed into a dynamic WHERE clause.
    /// No filter (or an empty one) returns all tasks in store-default
    /// order; no explicit ORDER BY is applied.
    pub async fn list(pool: &PgPool, filter: Option<&TaskFilter>) -> Result<Vec<Self>, sqlx::Error> {
        let filter = match filter {
            Some(f) if !f.is_empty() => f,
            _ => {
                let query = format!("SELECT {} FROM tasks", TASK_COLUMNS);
                return sqlx::query_as::<_, Task>(&query).fetch_all(pool).await;
            }
        };

        let query = format!(
            "SELECT {} FROM tasks{}",
            TASK_COLUMNS,
            filter.where_clause()
        );

        // Binds must follow the placeholder order built in where_clause
        let mut q = sqlx::query_as::<_, Task>(&query);

        if let Some(status) = filter.status {
            q = q.bind(status);
        }
        if let Some(member_id) = filter.assigned_member_id {
            q = q.bind(member_id);
        }
        if filter.overdue_only.unwrap_or(false) {
            q = q.bind(Utc::now());
        }
        if let Some(before) = filter.deadline_before {
            q = q.bind(before);
        }
        if let Some(after) = filter.deadline_after {
            q = q.bind(after);
        }

        let tasks = q.fetch_all(pool).await?;

        Ok(tasks)
    }

    /// Lists all tasks whose assignee still resolves to a user
    ///
    /// Inner-join semantics: a task whose assignee row is gone would be
    /// silently excluded. This is the dashboard's input set.
    pub async fn list_with_assignee(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT t.id, t.title, t.description, t.deadline, t.assigned_member_id,
                   t.effort_spent, t.status, t.dependencies, t.created_at
            FROM tasks t
            INNER JOIN users u ON t.assigned_member_id = u.id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates an existing task
    ///
    /// Only set fields are written. A `description` of Some(None) clears
    /// the column. An update with no fields set returns the current row
    /// unchanged.
    ///
    /// # Returns
    ///
    /// The updated task if found, None if the task doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        // Build dynamic update query based on which fields are present
        let mut sets = Vec::new();
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            sets.push(format!("title = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            sets.push(format!("description = ${}", bind_count));
        }
        if data.deadline.is_some() {
            bind_count += 1;
            sets.push(format!("deadline = ${}", bind_count));
        }
        if data.assigned_member_id.is_some() {
            bind_count += 1;
            sets.push(format!("assigned_member_id = ${}", bind_count));
        }
        if data.effort_spent.is_some() {
            bind_count += 1;
            sets.push(format!("effort_spent = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            sets.push(format!("status = ${}", bind_count));
        }
        if data.dependencies.is_some() {
            bind_count += 1;
            sets.push(format!("dependencies = ${}", bind_count));
        }

        let query = format!(
            "UPDATE tasks SET {} WHERE id = $1 RETURNING {}",
            sets.join(", "),
            TASK_COLUMNS
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(description) = data.description {
            q = q.bind(description);
        }
        if let Some(deadline) = data.deadline {
            q = q.bind(deadline);
        }
        if let Some(member_id) = data.assigned_member_id {
            q = q.bind(member_id);
        }
        if let Some(effort) = data.effort_spent {
            q = q.bind(effort);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(dependencies) = data.dependencies {
            q = q.bind(Json(dependencies));
        }

        let task = q.fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if the task didn't exist. Callers
    /// treating absence as success get idempotent deletion.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts tasks assigned to a user
    ///
    /// Used to block user deletion while references remain.
    pub async fn count_assigned_to(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE assigned_member_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}
