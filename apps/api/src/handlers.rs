//! HTTP handlers grouped by surface.

pub mod auth;
pub mod health;
pub mod integrations;
