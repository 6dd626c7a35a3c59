//! HTTP handlers for all API routes.

pub mod system;
pub mod query;
pub mod mit;
pub mod report;
pub mod admin;
