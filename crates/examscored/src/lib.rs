//! Examscore daemon library - exposes modules for testing.

pub mod config;
pub mod middleware;
pub mod pages;
pub mod routes;
pub mod server;
