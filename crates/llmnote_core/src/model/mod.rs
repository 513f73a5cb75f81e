//! Domain model for the project/note organizer read side.
//!
//! # Responsibility
//! - Define normalized records as they come out of storage.
//! - Define the denormalized read-model shapes handed to the presentation layer.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Derived fields (`tags`, `recentNote`) are never persisted.

pub mod catalog;
pub mod note;
pub mod project;
