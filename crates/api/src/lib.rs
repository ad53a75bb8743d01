//! Keystone API -- HTTP surface for registration, login, logout, and
//! session checks.

pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;
