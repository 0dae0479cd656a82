/// RPC procedure handlers
///
/// This module contains all procedure handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `users`: User CRUD procedures
/// - `tasks`: Task CRUD and filtered listing procedures
/// - `dashboard`: Dashboard categorization procedure

pub mod dashboard;
pub mod health;
pub mod tasks;
pub mod users;

use serde::{Deserialize, Deserializer};

/// Deserializes a field that distinguishes "absent" from "present null"
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on
/// `Option<Option<T>>` fields: an absent key stays `None` (leave the
/// column untouched), an explicit JSON `null` becomes `Some(None)`
/// (clear the column).
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
