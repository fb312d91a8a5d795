//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod health;
pub mod menu;
pub mod restaurant;
pub mod vote;
