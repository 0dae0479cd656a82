/// Database layer for Taskdeck
///
/// This module provides connection pooling and migrations. Models live
/// in the `models` module at crate root level.
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Database migration runner

pub mod migrations;
pub mod pool;
