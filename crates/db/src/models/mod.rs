//! Row structs for each table.

pub mod revoked_token;
pub mod user;
