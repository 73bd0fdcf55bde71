//! Core procurement logic for Procura.
//!
//! Two loosely related components, both pure orchestration over the
//! record-store boundary:
//!
//! - `notification` - routes procurement-approval events to recipient
//!   users and persists one notification per recipient (best-effort)
//! - `budget` - computes a project's planned-vs-withdrawn budget
//!   snapshot from approved subcontractor requests (strict)
//!
//! Neither component holds in-process state; every invocation is a fresh
//! read-compute-write sequence against the store handle it was built with.

pub mod budget;
pub mod notification;
pub mod policy;
