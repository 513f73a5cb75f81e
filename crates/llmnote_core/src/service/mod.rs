//! Read-model services consumed by the presentation layer.
//!
//! # Responsibility
//! - Assemble UI-ready views from repository queries.
//! - Classify failures into fatal (`LoadError`) and isolated
//!   (`PartialFailure`) outcomes.
//!
//! # Invariants
//! - Services never expose storage error text in user-facing messages.
//! - Every failure is paired with one `error!` log line.

pub mod load_error;
pub mod project_detail;
pub mod project_summary;
pub mod tag_join;
