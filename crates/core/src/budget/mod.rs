//! Project budget aggregation.
//!
//! Builds a consistent planned-vs-withdrawn snapshot for one project from
//! approved subcontractor purchase requests. Nothing is cached; every
//! snapshot is recomputed from the store. Fetch failures propagate; a
//! partial snapshot is never returned.

pub mod accumulate;
pub mod aggregator;
pub mod types;

#[cfg(test)]
mod accumulate_props;

pub use accumulate::{WithdrawalLedger, compute_stats};
pub use aggregator::BudgetAggregator;
pub use types::{
    BudgetStats, PlannedItemBudget, ProjectBudgetSnapshot, ReserveEntry, WithdrawalDetail,
};
