/// Dashboard task categorization
///
/// Partitions tasks into deadline buckets relative to a reference
/// instant. Categorization is a pure function of `(tasks, now)`: the
/// caller supplies `now` explicitly, which keeps the logic deterministic
/// under test.
///
/// # Buckets
///
/// - `overdue`: deadline strictly before `now`, status not done
/// - `nearing_deadline`: deadline within `[now, now + 3 days]`, status
///   not done
/// - `in_progress`: status is in_progress, regardless of deadline
/// - `total`: count of all input tasks
///
/// Buckets may overlap: an in-progress task with a near deadline appears
/// in both `nearing_deadline` and `in_progress`. A task whose deadline
/// equals `now` exactly is nearing, never overdue.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::task::{Task, TaskStatus};

/// The inclusive forward window for the nearing-deadline bucket
const NEARING_WINDOW_DAYS: i64 = 3;

/// Dashboard view of the task set
///
/// Serialized with the camelCase keys the dashboard clients consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTasks {
    /// Tasks past their deadline and not done
    pub overdue: Vec<Task>,

    /// Tasks due within the next three days and not done
    pub nearing_deadline: Vec<Task>,

    /// Tasks currently in progress
    pub in_progress: Vec<Task>,

    /// Total number of tasks, unconditional
    pub total: usize,
}

/// Categorizes tasks into dashboard buckets relative to `now`
///
/// The input is expected to be the set of tasks whose assignee still
/// resolves (see [`Task::list_with_assignee`]). The three-day window is
/// fixed.
pub fn categorize_tasks(tasks: Vec<Task>, now: DateTime<Utc>) -> DashboardTasks {
    let window_end = now + Duration::days(NEARING_WINDOW_DAYS);
    let total = tasks.len();

    let overdue = tasks
        .iter()
        .filter(|task| task.deadline < now && task.status != TaskStatus::Done)
        .cloned()
        .collect();

    let nearing_deadline = tasks
        .iter()
        .filter(|task| {
            task.deadline >= now
                && task.deadline <= window_end
                && task.status != TaskStatus::Done
        })
        .cloned()
        .collect();

    let in_progress = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::InProgress)
        .cloned()
        .collect();

    DashboardTasks {
        overdue,
        nearing_deadline,
        in_progress,
        total,
    }
}
