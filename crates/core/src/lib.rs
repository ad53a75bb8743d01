//! Shared types, models, and store contracts for the keystone workspace.
//!
//! This crate has no internal dependencies so both the auth layer and the
//! database layer can build on it without depending on each other.

pub mod error;
pub mod models;
pub mod repository;
pub mod types;
