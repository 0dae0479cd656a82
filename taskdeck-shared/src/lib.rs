//! # Taskdeck Shared Library
//!
//! This crate contains the data models and core logic shared by the
//! Taskdeck API server and its integration tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and CRUD operations
//! - `dashboard`: Deadline categorization for the dashboard view
//! - `db`: Connection pool and migrations

pub mod dashboard;
pub mod db;
pub mod models;

/// Current version of the Taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
