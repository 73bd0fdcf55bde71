//! Pure withdrawal accumulation.
//!
//! The aggregator feeds approved subcontractor line items in here one PR
//! at a time; accumulation order does not affect any sum, so a concurrent
//! fetch of the per-PR items would not change the contract.

use std::collections::HashMap;

use rust_decimal::Decimal;

use procura_store::records::{PrItemRecord, ProjectItemRecord, PurchaseRequestRecord};

use super::types::{BudgetStats, PlannedItemBudget, ReserveEntry, WithdrawalDetail};

/// Accumulates withdrawals and reserve spending across approved
/// subcontractor purchase requests.
#[derive(Debug, Default)]
pub struct WithdrawalLedger {
    withdrawn_quantity: HashMap<String, Decimal>,
    details: HashMap<String, Vec<WithdrawalDetail>>,
    reserve: Vec<ReserveEntry>,
    total_reserve: Decimal,
}

impl WithdrawalLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a regular (or untyped) line item from an approved PR.
    ///
    /// Items without a planned-item reference are ignored; they belong to
    /// no budget line. Totals are recomputed as quantity × unit price, so
    /// a stale stored total never reaches the snapshot.
    pub fn record_regular(&mut self, pr: &PurchaseRequestRecord, item: &PrItemRecord) {
        let Some(planned_id) = &item.project_item else {
            return;
        };
        *self
            .withdrawn_quantity
            .entry(planned_id.clone())
            .or_default() += item.quantity;
        self.details
            .entry(planned_id.clone())
            .or_default()
            .push(WithdrawalDetail {
                pr_number: pr.pr_number.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                total: item.computed_total(),
                created: pr.created,
            });
    }

    /// Records a reserve line item from an approved PR.
    ///
    /// Reserve spending is tracked project-wide, never against a planned
    /// item.
    pub fn record_reserve(&mut self, pr: &PurchaseRequestRecord, item: &PrItemRecord) {
        let total = item.computed_total();
        self.total_reserve += total;
        self.reserve.push(ReserveEntry {
            pr_number: pr.pr_number.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            total,
            created: pr.created,
        });
    }

    /// Merges accumulated withdrawal data onto the planned items.
    ///
    /// Planned items with no withdrawals get zero/empty defaults.
    /// Withdrawals referencing an unknown planned item are dropped here
    /// and therefore never contribute to the snapshot totals.
    #[must_use]
    pub fn into_parts(
        mut self,
        planned: Vec<ProjectItemRecord>,
    ) -> (Vec<PlannedItemBudget>, Vec<ReserveEntry>, Decimal) {
        let planned_items = planned
            .into_iter()
            .map(|item| {
                let withdrawn_quantity =
                    self.withdrawn_quantity.remove(&item.id).unwrap_or_default();
                let withdrawals = self.details.remove(&item.id).unwrap_or_default();
                PlannedItemBudget {
                    item,
                    withdrawn_quantity,
                    withdrawals,
                }
            })
            .collect();
        (planned_items, self.reserve, self.total_reserve)
    }
}

/// Computes project-level totals from the enriched planned items.
///
/// `total_withdrawn` is recomputed from the per-item detail records, not
/// from a separate accumulator, so the displayed total is always
/// reconstructible from the displayed breakdown.
#[must_use]
pub fn compute_stats(planned: &[PlannedItemBudget], total_reserve: Decimal) -> BudgetStats {
    let total_planned: Decimal = planned.iter().map(|p| p.item.total_price).sum();
    let total_withdrawn: Decimal = planned.iter().map(PlannedItemBudget::withdrawn_total).sum();
    BudgetStats {
        total_planned,
        total_withdrawn,
        remaining: total_planned - total_withdrawn,
        total_reserve,
    }
}
