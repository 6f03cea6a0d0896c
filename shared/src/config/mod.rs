//! Configuration modules for the LendHub backend

pub mod database;
pub mod environment;
pub mod server;

pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::ServerConfig;
