//! Error-handling policies at the component boundaries.
//!
//! Two policies coexist and are deliberately asymmetric:
//!
//! - **best-effort** (notification routing): a backend failure is logged
//!   and replaced with a safe default, so a notification outage never
//!   blocks the procurement workflow that triggered it.
//! - **strict** (budget aggregation): failures propagate with `?`; a
//!   partial snapshot is never returned.
//!
//! The strict policy needs no wrapper. The best-effort policy goes through
//! [`best_effort`] at every call site so the choice is visible and testable
//! rather than an ad-hoc `catch` sprinkled per call.

use procura_store::StoreError;
use tracing::warn;

/// Resolves a store result best-effort: the value on success, `default`
/// (after logging) on failure.
pub fn best_effort<T>(operation: &'static str, result: Result<T, StoreError>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            warn!(operation, %error, "backend call failed, continuing with default");
            default
        }
    }
}
