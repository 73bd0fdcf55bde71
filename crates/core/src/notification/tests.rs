//! Router tests against the in-memory store.

use std::sync::Arc;

use serde_json::{Value, json};

use procura_shared::NotificationKind;
use procura_store::records::{PurchaseRequestRecord, collections};
use procura_store::{ListQuery, MemoryStore, RecordStore};

use super::router::NotificationRouter;

const HEAD_1: &str = "uhead10000000001";
const HEAD_2: &str = "uhead20000000002";
const MANAGER_1: &str = "umgr100000000003";
const TOP_ADMIN: &str = "uadmin0000000004";
const EMPLOYEE: &str = "uemp100000000005";

async fn seed_user(store: &MemoryStore, id: &str, name: &str, role: &str) {
    store
        .create(
            collections::USERS,
            json!({"id": id, "name": name, "role": role}),
        )
        .await
        .expect("seed user");
}

async fn seed_default_users(store: &MemoryStore) {
    seed_user(store, HEAD_1, "Head One", "head_of_dept").await;
    seed_user(store, HEAD_2, "Head Two", "head_of_dept").await;
    seed_user(store, MANAGER_1, "Manager One", "manager").await;
    seed_user(store, TOP_ADMIN, "Admin", "top_admin").await;
    seed_user(store, EMPLOYEE, "Employee", "employee").await;
}

fn sample_pr() -> PurchaseRequestRecord {
    PurchaseRequestRecord::from_value(&json!({
        "id": "pr0000000000001",
        "pr_number": "PR-2024-001"
    }))
}

async fn written_recipients(store: &MemoryStore) -> Vec<String> {
    store
        .list(collections::NOTIFICATIONS, ListQuery::all())
        .await
        .expect("list notifications")
        .iter()
        .filter_map(|n| n.get("user").and_then(Value::as_str))
        .map(ToString::to_string)
        .collect()
}

#[tokio::test]
async fn test_notify_new_pr_excludes_requester_and_employees() {
    let store = Arc::new(MemoryStore::new());
    seed_default_users(&store).await;
    let router = NotificationRouter::new(store.clone());

    let delivered = router
        .notify_new_pr(&sample_pr(), EMPLOYEE, Some("Employee"))
        .await;

    assert_eq!(delivered, 4);
    let mut recipients = written_recipients(&store).await;
    recipients.sort();
    let mut expected = vec![
        HEAD_1.to_string(),
        HEAD_2.to_string(),
        MANAGER_1.to_string(),
        TOP_ADMIN.to_string(),
    ];
    expected.sort();
    assert_eq!(recipients, expected);
}

#[tokio::test]
async fn test_notify_new_pr_excludes_requesting_head() {
    let store = Arc::new(MemoryStore::new());
    seed_default_users(&store).await;
    let router = NotificationRouter::new(store.clone());

    let delivered = router
        .notify_new_pr(&sample_pr(), HEAD_1, Some("Head One"))
        .await;

    assert_eq!(delivered, 3);
    assert!(!written_recipients(&store).await.contains(&HEAD_1.to_string()));
}

#[tokio::test]
async fn test_notify_new_pr_message_and_kind() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, HEAD_1, "Head One", "head_of_dept").await;
    let router = NotificationRouter::new(store.clone());

    router.notify_new_pr(&sample_pr(), EMPLOYEE, None).await;

    let notifications = store
        .list(collections::NOTIFICATIONS, ListQuery::all())
        .await
        .expect("list");
    let n = &notifications[0];
    let message = n.get("message").and_then(Value::as_str).expect("message");
    assert!(message.contains("PR-2024-001"));
    assert!(message.contains("ไม่ระบุ"), "missing-name fallback expected");
    assert_eq!(n.get("type").and_then(Value::as_str), Some("info"));
    assert_eq!(n.get("pr_id").and_then(Value::as_str), Some("pr0000000000001"));
    assert_eq!(n.get("is_read"), Some(&Value::Bool(false)));
}

// Inherited behavior: the approving head is not excluded from the
// department-head recipient set and therefore notifies themselves. This
// test pins the quirk; the exclusion in notify_new_pr shows what the
// "fixed" variant would look like.
#[tokio::test]
async fn test_head_decision_still_notifies_approving_head() {
    let store = Arc::new(MemoryStore::new());
    seed_default_users(&store).await;
    let router = NotificationRouter::new(store.clone());

    let delivered = router
        .notify_by_head_of_dept(&sample_pr(), "Head One", true, Some(EMPLOYEE))
        .await;

    // Both heads, manager tier, and the requester.
    assert_eq!(delivered, 5);
    let recipients = written_recipients(&store).await;
    assert!(recipients.contains(&HEAD_1.to_string()));
    assert!(recipients.contains(&EMPLOYEE.to_string()));
}

#[tokio::test]
async fn test_head_rejection_kind() {
    let store = Arc::new(MemoryStore::new());
    seed_user(&store, HEAD_1, "Head One", "head_of_dept").await;
    let router = NotificationRouter::new(store.clone());

    router
        .notify_by_head_of_dept(&sample_pr(), "Head One", false, None)
        .await;

    let notifications = store
        .list(collections::NOTIFICATIONS, ListQuery::all())
        .await
        .expect("list");
    assert_eq!(
        notifications[0].get("type").and_then(Value::as_str),
        Some(NotificationKind::Rejection.as_str())
    );
}

#[tokio::test]
async fn test_notify_by_manager_targets_heads_and_requester() {
    let store = Arc::new(MemoryStore::new());
    seed_default_users(&store).await;
    let router = NotificationRouter::new(store.clone());

    let delivered = router
        .notify_by_manager(&sample_pr(), "Manager One", true, Some(EMPLOYEE))
        .await;

    assert_eq!(delivered, 3);
    let recipients = written_recipients(&store).await;
    assert!(recipients.contains(&HEAD_1.to_string()));
    assert!(recipients.contains(&HEAD_2.to_string()));
    assert!(recipients.contains(&EMPLOYEE.to_string()));
    assert!(!recipients.contains(&MANAGER_1.to_string()));
}

#[tokio::test]
async fn test_notify_by_manager_requester_also_head_collapses() {
    let store = Arc::new(MemoryStore::new());
    seed_default_users(&store).await;
    let router = NotificationRouter::new(store.clone());

    let delivered = router
        .notify_by_manager(&sample_pr(), "Manager One", true, Some(HEAD_1))
        .await;

    // HEAD_1 appears once, not twice.
    assert_eq!(delivered, 2);
}

#[tokio::test]
async fn test_malformed_requester_id_not_delivered() {
    let store = Arc::new(MemoryStore::new());
    seed_default_users(&store).await;
    let router = NotificationRouter::new(store.clone());

    let delivered = router
        .notify_by_manager(&sample_pr(), "Manager One", true, Some("0"))
        .await;

    assert_eq!(delivered, 2);
    assert!(!written_recipients(&store).await.contains(&"0".to_string()));
}

#[tokio::test]
async fn test_users_outage_degrades_to_zero_deliveries() {
    let store = Arc::new(MemoryStore::new());
    seed_default_users(&store).await;
    store.fail_collection(collections::USERS);
    let router = NotificationRouter::new(store.clone());

    let delivered = router
        .notify_new_pr(&sample_pr(), EMPLOYEE, Some("Employee"))
        .await;

    assert_eq!(delivered, 0);
    assert_eq!(store.count(collections::NOTIFICATIONS), 0);
}

#[tokio::test]
async fn test_notifications_outage_swallowed() {
    let store = Arc::new(MemoryStore::new());
    seed_default_users(&store).await;
    store.fail_collection(collections::NOTIFICATIONS);
    let router = NotificationRouter::new(store.clone());

    let delivered = router
        .notify_new_pr(&sample_pr(), EMPLOYEE, Some("Employee"))
        .await;

    assert_eq!(delivered, 0);
}

#[tokio::test]
async fn test_get_by_user_newest_first_with_limit() {
    let store = Arc::new(MemoryStore::new());
    let router = NotificationRouter::new(store.clone());

    for i in 0..12 {
        store
            .create(
                collections::NOTIFICATIONS,
                json!({
                    "user": EMPLOYEE,
                    "title": format!("n{i}"),
                    "message": "m",
                    "type": "info",
                    "is_read": false,
                    "created": format!("2024-01-{:02} 10:00:00.000Z", i + 1)
                }),
            )
            .await
            .expect("seed notification");
    }

    let feed = router.get_by_user(EMPLOYEE, None).await;
    assert_eq!(feed.len(), 10);
    assert_eq!(feed[0].title, "n11");
    assert_eq!(feed[9].title, "n2");

    let short = router.get_by_user(EMPLOYEE, Some(3)).await;
    assert_eq!(short.len(), 3);
}

#[tokio::test]
async fn test_get_by_user_empty_on_outage() {
    let store = Arc::new(MemoryStore::new());
    store.fail_collection(collections::NOTIFICATIONS);
    let router = NotificationRouter::new(store.clone());

    assert!(router.get_by_user(EMPLOYEE, None).await.is_empty());
}

#[tokio::test]
async fn test_mark_all_as_read_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let router = NotificationRouter::new(store.clone());

    for i in 0..3 {
        store
            .create(
                collections::NOTIFICATIONS,
                json!({"user": EMPLOYEE, "title": format!("n{i}"), "is_read": false}),
            )
            .await
            .expect("seed");
    }

    router.mark_all_as_read(EMPLOYEE).await;
    // Second invocation finds zero unread records and succeeds quietly.
    router.mark_all_as_read(EMPLOYEE).await;

    let all = store
        .list(collections::NOTIFICATIONS, ListQuery::all())
        .await
        .expect("list");
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|n| n.get("is_read") == Some(&Value::Bool(true))));
}

#[tokio::test]
async fn test_mark_as_read_and_delete() {
    let store = Arc::new(MemoryStore::new());
    let router = NotificationRouter::new(store.clone());

    let stored = store
        .create(
            collections::NOTIFICATIONS,
            json!({"user": EMPLOYEE, "title": "n", "is_read": false}),
        )
        .await
        .expect("seed");
    let id = stored
        .get("id")
        .and_then(Value::as_str)
        .expect("id")
        .to_string();

    router.mark_as_read(&id).await;
    let record = store
        .get_one(collections::NOTIFICATIONS, &id)
        .await
        .expect("get");
    assert_eq!(record.get("is_read"), Some(&Value::Bool(true)));

    router.delete(&id).await;
    assert_eq!(store.count(collections::NOTIFICATIONS), 0);

    // Deleting again fails backend-side but stays silent here.
    router.delete(&id).await;
}

#[tokio::test]
async fn test_project_manager_lookup() {
    let store = Arc::new(MemoryStore::new());
    store
        .create(
            collections::PROJECTS,
            json!({"id": "pj0000000000001", "name": "Site A", "manager": MANAGER_1}),
        )
        .await
        .expect("seed project");
    store
        .create(
            collections::PROJECTS,
            json!({"id": "pj0000000000002", "name": "Site B", "manager": "0"}),
        )
        .await
        .expect("seed project");
    let router = NotificationRouter::new(store.clone());

    assert_eq!(
        router.project_manager("pj0000000000001").await,
        Some(MANAGER_1.to_string())
    );
    // Malformed manager reference is treated as absent.
    assert_eq!(router.project_manager("pj0000000000002").await, None);
    // Unknown project degrades to None, not an error.
    assert_eq!(router.project_manager("pj0000000000099").await, None);
}
