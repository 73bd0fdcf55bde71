//! Budget snapshot data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use procura_store::records::{ProjectItemRecord, ProjectRecord, PurchaseRequestRecord};

/// One withdrawal against a planned item, attributed to a purchase request.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalDetail {
    /// Number of the purchase request the withdrawal came from.
    pub pr_number: String,
    /// Withdrawn quantity.
    pub quantity: Decimal,
    /// Unit price on the line item.
    pub unit_price: Decimal,
    /// Recomputed total: quantity × unit price.
    pub total: Decimal,
    /// Creation date of the purchase request.
    pub created: Option<DateTime<Utc>>,
}

/// One reserve (contingency) line item, not attributed to any planned item.
#[derive(Debug, Clone, Serialize)]
pub struct ReserveEntry {
    /// Number of the purchase request the reserve item belongs to.
    pub pr_number: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
    /// Recomputed total: quantity × unit price.
    pub total: Decimal,
    /// Creation date of the purchase request.
    pub created: Option<DateTime<Utc>>,
}

/// A planned item enriched with its cumulative withdrawal state.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedItemBudget {
    /// The planned item as stored.
    #[serde(flatten)]
    pub item: ProjectItemRecord,
    /// Cumulative withdrawn quantity across approved subcontractor PRs.
    pub withdrawn_quantity: Decimal,
    /// Per-PR withdrawal breakdown; the displayed withdrawn total is
    /// always reconstructible from these.
    pub withdrawals: Vec<WithdrawalDetail>,
}

impl PlannedItemBudget {
    /// Withdrawn amount, recomputed from the detail breakdown.
    #[must_use]
    pub fn withdrawn_total(&self) -> Decimal {
        self.withdrawals.iter().map(|d| d.total).sum()
    }
}

/// Project-level budget totals.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStats {
    /// Sum of planned items' total price.
    pub total_planned: Decimal,
    /// Sum of withdrawal-detail totals across planned items.
    pub total_withdrawn: Decimal,
    /// `total_planned - total_withdrawn`.
    pub remaining: Decimal,
    /// Sum of reserve item totals.
    pub total_reserve: Decimal,
}

/// Consistent snapshot of a project's planned-vs-withdrawn budget state.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectBudgetSnapshot {
    /// The project record.
    pub project: ProjectRecord,
    /// Project-linked purchase requests (type `project`).
    pub project_prs: Vec<PurchaseRequestRecord>,
    /// Subcontractor purchase requests (type `sub`), approved or not.
    pub sub_prs: Vec<PurchaseRequestRecord>,
    /// Planned items enriched with withdrawal state.
    pub planned_items: Vec<PlannedItemBudget>,
    /// Reserve items across approved subcontractor requests.
    pub reserve_items: Vec<ReserveEntry>,
    /// Project-level totals.
    pub stats: BudgetStats,
}
