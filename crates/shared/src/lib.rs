//! Shared types and configuration for Procura.
//!
//! This crate provides the vocabulary used across all other crates:
//! - User roles driving notification routing
//! - Record-identifier validity guard
//! - Procurement document classification (type and status tags)
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{NotificationKind, PrItemType, PrStatus, PrType, UserRole, is_valid_record_id};
