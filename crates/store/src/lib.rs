//! Record-store client boundary for Procura.
//!
//! The procurement logic is a client of a generic document/record store
//! reached over HTTP. This crate isolates that boundary:
//!
//! - [`RecordStore`] - the object-safe client contract
//! - [`Filter`] / [`ListQuery`] - typed query construction
//! - [`HttpStore`] - the real backend, speaking JSON over HTTP
//! - [`MemoryStore`] - in-process double for tests and local development
//! - [`records`] - one normalizing mapping per collection, so loosely-typed
//!   maps never cross into business logic

pub mod client;
pub mod error;
pub mod filter;
pub mod memory;
pub mod records;

pub use client::{HttpStore, RecordStore};
pub use error::StoreError;
pub use filter::{Filter, ListQuery, Literal};
pub use memory::MemoryStore;
