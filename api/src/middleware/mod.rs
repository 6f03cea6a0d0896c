//! Middleware modules for the API server

pub mod cors;
