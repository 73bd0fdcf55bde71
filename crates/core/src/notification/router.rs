//! Notification router.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use procura_shared::{NotificationKind, UserRole, is_valid_record_id};
use procura_store::records::{
    NotificationRecord, ProjectRecord, PurchaseRequestRecord, UserRecord, collections,
};
use procura_store::{Filter, ListQuery, RecordStore};

use crate::policy::best_effort;

use super::messages;
use super::recipients::deliverable_recipients;
use super::types::NewNotification;

/// Default page size for a user's notification feed.
pub const DEFAULT_FEED_LIMIT: usize = 10;

/// Routes procurement-approval events to notification records.
///
/// Holds only the store handle it was constructed with; every operation is
/// a fresh read-compute-write sequence. All backend interaction is
/// best-effort: an outage degrades silently instead of blocking the
/// procurement workflow.
pub struct NotificationRouter {
    store: Arc<dyn RecordStore>,
}

impl NotificationRouter {
    /// Creates a router over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Notifies reviewers about a newly submitted purchase request.
    ///
    /// Recipients: all department heads and all manager-tier users, minus
    /// the requester, deduplicated. Returns the number of notifications
    /// written.
    pub async fn notify_new_pr(
        &self,
        pr: &PurchaseRequestRecord,
        requester_id: &str,
        requester_name: Option<&str>,
    ) -> usize {
        let heads = self.head_of_depts().await;
        let managers = self.managers().await;
        let candidates = heads
            .into_iter()
            .chain(managers)
            .map(|u| u.id);
        let recipients = deliverable_recipients(candidates, Some(requester_id));

        let (title, message) = messages::new_pr(&pr.pr_number, requester_name);
        self.deliver(&recipients, &title, &message, NotificationKind::Info, &pr.id)
            .await
    }

    /// Notifies about a department-head decision on a purchase request.
    ///
    /// Recipients: all department heads, all manager-tier users, and the
    /// requester when provided, deduplicated. The approving head is not
    /// removed from the set and notifies themselves; long-standing
    /// behavior, pinned by tests. Returns the number of notifications
    /// written.
    pub async fn notify_by_head_of_dept(
        &self,
        pr: &PurchaseRequestRecord,
        approver_name: &str,
        is_approval: bool,
        requester_id: Option<&str>,
    ) -> usize {
        let heads = self.head_of_depts().await;
        let managers = self.managers().await;
        let mut candidates: Vec<String> = heads
            .into_iter()
            .chain(managers)
            .map(|u| u.id)
            .collect();
        if let Some(requester) = requester_id {
            candidates.push(requester.to_string());
        }
        let recipients = deliverable_recipients(candidates, None);

        let (title, message) = messages::head_decision(&pr.pr_number, approver_name, is_approval);
        self.deliver(
            &recipients,
            &title,
            &message,
            NotificationKind::for_decision(is_approval),
            &pr.id,
        )
        .await
    }

    /// Notifies about a manager decision on a purchase request.
    ///
    /// Recipients: all department heads, plus the requester when provided,
    /// deduplicated. Returns the number of notifications written.
    pub async fn notify_by_manager(
        &self,
        pr: &PurchaseRequestRecord,
        approver_name: &str,
        is_approval: bool,
        requester_id: Option<&str>,
    ) -> usize {
        let mut candidates: Vec<String> =
            self.head_of_depts().await.into_iter().map(|u| u.id).collect();
        if let Some(requester) = requester_id {
            candidates.push(requester.to_string());
        }
        let recipients = deliverable_recipients(candidates, None);

        let (title, message) =
            messages::manager_decision(&pr.pr_number, approver_name, is_approval);
        self.deliver(
            &recipients,
            &title,
            &message,
            NotificationKind::for_decision(is_approval),
            &pr.id,
        )
        .await
    }

    /// Returns a user's most recent notifications, newest first.
    ///
    /// `limit` defaults to [`DEFAULT_FEED_LIMIT`]. On backend failure the
    /// feed is empty rather than an error.
    pub async fn get_by_user(&self, user_id: &str, limit: Option<usize>) -> Vec<NotificationRecord> {
        let query = ListQuery::all()
            .filter(Filter::eq("user", user_id))
            .sort("-created")
            .limit(limit.unwrap_or(DEFAULT_FEED_LIMIT));
        let raw = best_effort(
            "notifications.list",
            self.store.list(collections::NOTIFICATIONS, query).await,
            Vec::new(),
        );
        raw.iter().map(NotificationRecord::from_value).collect()
    }

    /// Marks one notification as read. Fire and forget.
    pub async fn mark_as_read(&self, id: &str) {
        best_effort(
            "notifications.mark_read",
            self.store
                .update(collections::NOTIFICATIONS, id, json!({"is_read": true}))
                .await
                .map(|_| ()),
            (),
        );
    }

    /// Marks all of a user's unread notifications as read.
    ///
    /// Idempotent: zero matching unread records is a valid outcome, and
    /// per-record failures are skipped.
    pub async fn mark_all_as_read(&self, user_id: &str) {
        let query = ListQuery::all()
            .filter(Filter::and([
                Filter::eq("user", user_id),
                Filter::eq_bool("is_read", false),
            ]))
            .fields(["id"]);
        let unread = best_effort(
            "notifications.list_unread",
            self.store.list(collections::NOTIFICATIONS, query).await,
            Vec::new(),
        );

        for record in &unread {
            let Some(id) = record.get("id").and_then(Value::as_str) else {
                continue;
            };
            best_effort(
                "notifications.mark_read",
                self.store
                    .update(collections::NOTIFICATIONS, id, json!({"is_read": true}))
                    .await
                    .map(|_| ()),
                (),
            );
        }
    }

    /// Deletes one notification. Fire and forget.
    pub async fn delete(&self, id: &str) {
        best_effort(
            "notifications.delete",
            self.store.delete(collections::NOTIFICATIONS, id).await,
            (),
        );
    }

    /// Resolves a project's manager, or `None` on any failure or when the
    /// project carries no plausible manager reference.
    pub async fn project_manager(&self, project_id: &str) -> Option<String> {
        let record = best_effort(
            "projects.get_one",
            self.store
                .get_one(collections::PROJECTS, project_id)
                .await
                .map(Some),
            None,
        )?;
        ProjectRecord::from_value(&record)
            .manager
            .filter(|id| is_valid_record_id(id))
    }

    /// All users with the department-head role; empty on failure.
    async fn head_of_depts(&self) -> Vec<UserRecord> {
        self.users_with(|role| role == UserRole::HeadOfDept).await
    }

    /// All manager-tier users (managers and top admins); empty on failure.
    async fn managers(&self) -> Vec<UserRecord> {
        self.users_with(|role| role.is_manager_tier()).await
    }

    /// Fetches the full user list projected to id+role and filters
    /// client-side; the backend's filter language stays out of role logic.
    async fn users_with(&self, predicate: impl Fn(UserRole) -> bool) -> Vec<UserRecord> {
        let raw = best_effort(
            "users.list",
            self.store
                .list(collections::USERS, ListQuery::all().fields(["id", "role"]))
                .await,
            Vec::new(),
        );
        raw.iter()
            .map(UserRecord::from_value)
            .filter(|u| u.role.is_some_and(&predicate))
            .collect()
    }

    /// Writes one notification per recipient, sequentially.
    ///
    /// A failed write is skipped without aborting delivery to the
    /// remaining recipients. Returns the number of successful writes.
    async fn deliver(
        &self,
        recipients: &[String],
        title: &str,
        message: &str,
        kind: NotificationKind,
        pr_id: &str,
    ) -> usize {
        let mut delivered = 0;
        for user in recipients {
            let payload = NewNotification {
                user: user.clone(),
                title: title.to_string(),
                message: message.to_string(),
                kind,
                pr_id: (!pr_id.is_empty()).then(|| pr_id.to_string()),
                is_read: false,
            };
            let value = match serde_json::to_value(&payload) {
                Ok(value) => value,
                Err(error) => {
                    warn!(%error, "could not serialize notification payload");
                    continue;
                }
            };
            if best_effort(
                "notifications.create",
                self.store
                    .create(collections::NOTIFICATIONS, value)
                    .await
                    .map(|_| true),
                false,
            ) {
                delivered += 1;
            }
        }
        debug!(delivered, total = recipients.len(), "notification fan-out done");
        delivered
    }
}
