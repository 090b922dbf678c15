//! Domain model for the curricula catalog.
//!
//! Subjects (asignaturas) and their per-program placements (vínculos) live in
//! a flat key-value namespace as two denormalized record families. This crate
//! owns everything about that namespace that does not touch a concrete store:
//!
//! - [`keys`]: code newtypes and the `asig:` / `vinculo:` / `user:` key layout
//! - [`model`]: stored record shapes and write drafts
//! - [`batch`]: the atomic set/delete batch handed to a store
//! - [`plan`]: the link write planner keeping both families consistent
//! - [`audit`]: offline check of the subject/link invariant
//! - [`error`]: [`CoreError`]

pub mod audit;
pub mod batch;
pub mod error;
pub mod keys;
pub mod model;
pub mod plan;

// Re-export commonly used types
pub use audit::{audit, ConsistencyReport, LinkRef};
pub use batch::{Batch, BatchOp};
pub use error::CoreError;
pub use keys::{ProgramCode, SubjectCode, UserId};
pub use model::{Link, Placement, Subject, SubjectDraft, User};
pub use plan::{plan_delete, plan_write, DeletePlan, WritePlan};
