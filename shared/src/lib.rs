//! # LendHub Shared
//!
//! Cross-cutting types shared by every layer of the LendHub backend:
//! configuration, pagination parameters, the API error envelope, and small
//! validation helpers. This crate holds no domain logic.

pub mod config;
pub mod types;
pub mod utils;
