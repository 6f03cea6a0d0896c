//! Database module - MySQL implementations using SQLx
//!
//! Connection pool management, repository implementations, and embedded
//! schema migrations.

pub mod connection;
pub mod mysql;

/// Schema migrations, embedded at compile time and applied at startup.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
