//! Repository layer: storage contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define the read-only query capability the loaders depend on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories never mutate data.
//! - Repository APIs return "absent" as `Ok(None)`, not as an error.

pub mod organizer_repo;
pub mod sqlite_store;
