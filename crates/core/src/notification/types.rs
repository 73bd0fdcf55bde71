//! Notification write payloads.

use serde::Serialize;

use procura_shared::NotificationKind;

/// Payload for a notification about to be written to the store.
///
/// Serialized field names match the `notifications` collection schema;
/// the kind tag is stored under `type`.
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    /// Recipient user id.
    pub user: String,
    /// Short title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Kind tag.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Related purchase-request id, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_id: Option<String>,
    /// Read flag; always false at creation.
    pub is_read: bool,
}
