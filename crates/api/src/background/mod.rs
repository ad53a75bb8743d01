//! Long-running maintenance tasks spawned by the server binary.

pub mod revocation_purge;
