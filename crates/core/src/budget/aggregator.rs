//! Budget snapshot aggregation.

use std::sync::Arc;

use procura_shared::{PrItemType, PrStatus, PrType};
use procura_store::records::{
    PrItemRecord, ProjectItemRecord, ProjectRecord, PurchaseRequestRecord, collections,
};
use procura_store::{Filter, ListQuery, RecordStore, StoreError};

use super::accumulate::{WithdrawalLedger, compute_stats};
use super::types::ProjectBudgetSnapshot;

/// Which line items of a purchase request to fetch.
#[derive(Debug, Clone, Copy)]
enum ItemSelector {
    /// Items typed `regular`, plus untyped legacy items.
    RegularOrUntyped,
    /// Items typed `reserve`.
    Reserve,
}

impl ItemSelector {
    fn filter(self, pr_id: &str) -> Filter {
        let type_filter = match self {
            Self::RegularOrUntyped => Filter::or([
                Filter::eq("item_type", PrItemType::Regular.as_str()),
                Filter::eq("item_type", ""),
            ]),
            Self::Reserve => Filter::eq("item_type", PrItemType::Reserve.as_str()),
        };
        Filter::and([Filter::eq("pr", pr_id), type_filter])
    }
}

/// Computes planned-vs-withdrawn budget snapshots for projects.
///
/// Strict error policy: any failed fetch propagates unmodified and no
/// partial snapshot is returned. This is the deliberate opposite of the
/// notification router's best-effort policy.
pub struct BudgetAggregator {
    store: Arc<dyn RecordStore>,
}

impl BudgetAggregator {
    /// Creates an aggregator over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Builds the budget snapshot for one project.
    ///
    /// Reads are issued sequentially; the per-PR item fetches are
    /// independent and could be parallelized without changing the
    /// accumulation result.
    ///
    /// # Errors
    ///
    /// Returns the first [`StoreError`] encountered; `NotFound` when the
    /// project does not exist.
    pub async fn snapshot(&self, project_id: &str) -> Result<ProjectBudgetSnapshot, StoreError> {
        let project = ProjectRecord::from_value(
            &self
                .store
                .get_one(collections::PROJECTS, project_id)
                .await?,
        );

        let project_prs = self
            .purchase_requests(project_id, PrType::Project, None)
            .await?;
        let planned = self.planned_items(project_id).await?;
        let sub_prs = self.purchase_requests(project_id, PrType::Sub, None).await?;
        let approved = self
            .purchase_requests(project_id, PrType::Sub, Some(PrStatus::Approved))
            .await?;

        let mut ledger = WithdrawalLedger::new();
        for pr in &approved {
            for item in self.line_items(&pr.id, ItemSelector::RegularOrUntyped).await? {
                ledger.record_regular(pr, &item);
            }
            for item in self.line_items(&pr.id, ItemSelector::Reserve).await? {
                ledger.record_reserve(pr, &item);
            }
        }

        let (planned_items, reserve_items, total_reserve) = ledger.into_parts(planned);
        let stats = compute_stats(&planned_items, total_reserve);

        Ok(ProjectBudgetSnapshot {
            project,
            project_prs,
            sub_prs,
            planned_items,
            reserve_items,
            stats,
        })
    }

    async fn purchase_requests(
        &self,
        project_id: &str,
        pr_type: PrType,
        status: Option<PrStatus>,
    ) -> Result<Vec<PurchaseRequestRecord>, StoreError> {
        let mut parts = vec![
            Filter::eq("project", project_id),
            Filter::eq("type", pr_type.as_str()),
        ];
        if let Some(status) = status {
            parts.push(Filter::eq("status", status.as_str()));
        }
        let raw = self
            .store
            .list(
                collections::PURCHASE_REQUESTS,
                ListQuery::all().filter(Filter::and(parts)).sort("-created"),
            )
            .await?;
        Ok(raw.iter().map(PurchaseRequestRecord::from_value).collect())
    }

    async fn planned_items(&self, project_id: &str) -> Result<Vec<ProjectItemRecord>, StoreError> {
        let raw = self
            .store
            .list(
                collections::PROJECT_ITEMS,
                ListQuery::all()
                    .filter(Filter::eq("project", project_id))
                    .sort("created"),
            )
            .await?;
        Ok(raw.iter().map(ProjectItemRecord::from_value).collect())
    }

    async fn line_items(
        &self,
        pr_id: &str,
        selector: ItemSelector,
    ) -> Result<Vec<PrItemRecord>, StoreError> {
        let raw = self
            .store
            .list(
                collections::PR_ITEMS,
                ListQuery::all().filter(selector.filter(pr_id)),
            )
            .await?;
        Ok(raw.iter().map(PrItemRecord::from_value).collect())
    }
}
