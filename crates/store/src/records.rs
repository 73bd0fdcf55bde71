//! Typed records for each backend collection.
//!
//! The backend is schema-less from this client's point of view: fields may
//! be absent, empty, or carried as a different JSON type than expected
//! (numbers sometimes arrive as strings). Each collection gets exactly one
//! mapping function that normalizes a raw record into an explicit struct;
//! business logic never touches `serde_json::Value` directly.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use procura_shared::types::{NotificationKind, PrItemType, PrStatus, PrType, UserRole};

/// Collection names used by this application.
pub mod collections {
    /// User accounts.
    pub const USERS: &str = "users";
    /// Projects.
    pub const PROJECTS: &str = "projects";
    /// Purchase requests.
    pub const PURCHASE_REQUESTS: &str = "purchase_requests";
    /// Purchase-request line items.
    pub const PR_ITEMS: &str = "pr_items";
    /// Project planned (budgeted) items.
    pub const PROJECT_ITEMS: &str = "project_items";
    /// Notifications.
    pub const NOTIFICATIONS: &str = "notifications";
}

/// A user account, as consumed for notification routing.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    /// Record id.
    pub id: String,
    /// Display name, when present.
    pub name: Option<String>,
    /// Role tag; `None` when absent or unrecognized.
    pub role: Option<UserRole>,
}

impl UserRecord {
    /// Normalizes a raw `users` record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            name: opt_str_field(value, "name"),
            role: opt_str_field(value, "role").and_then(|s| UserRole::parse(&s)),
        }
    }
}

/// A project, as consumed for budget aggregation and manager lookup.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRecord {
    /// Record id.
    pub id: String,
    /// Project name.
    pub name: Option<String>,
    /// Managing user's id, when assigned.
    pub manager: Option<String>,
}

impl ProjectRecord {
    /// Normalizes a raw `projects` record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            name: opt_str_field(value, "name"),
            manager: opt_str_field(value, "manager"),
        }
    }
}

/// A purchase request.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRequestRecord {
    /// Record id.
    pub id: String,
    /// Human-readable request number.
    pub pr_number: String,
    /// Requesting user's id, when present.
    pub requester: Option<String>,
    /// Parent project reference, when the request is project-linked.
    pub project: Option<String>,
    /// Type tag; `None` when absent or unrecognized.
    pub pr_type: Option<PrType>,
    /// Approval status; `None` when absent or unrecognized.
    pub status: Option<PrStatus>,
    /// Total amount as stored on the request.
    pub total_amount: Decimal,
    /// Creation timestamp, when parseable.
    pub created: Option<DateTime<Utc>>,
}

impl PurchaseRequestRecord {
    /// Normalizes a raw `purchase_requests` record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            pr_number: str_field(value, "pr_number"),
            requester: opt_str_field(value, "requester"),
            project: opt_str_field(value, "project"),
            pr_type: opt_str_field(value, "type").and_then(|s| PrType::parse(&s)),
            status: opt_str_field(value, "status").and_then(|s| PrStatus::parse(&s)),
            total_amount: decimal_field(value, "total_amount"),
            created: created_field(value),
        }
    }
}

/// A purchase-request line item.
#[derive(Debug, Clone, Serialize)]
pub struct PrItemRecord {
    /// Record id.
    pub id: String,
    /// Parent purchase-request id.
    pub pr: String,
    /// Planned-item reference, when the item draws against a project budget.
    pub project_item: Option<String>,
    /// Item type tag; `None` for untyped legacy items (treated as regular).
    pub item_type: Option<PrItemType>,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
    /// Stored total; aggregation recomputes quantity × unit price instead.
    pub total_price: Decimal,
}

impl PrItemRecord {
    /// Normalizes a raw `pr_items` record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            pr: str_field(value, "pr"),
            project_item: opt_str_field(value, "project_item"),
            item_type: opt_str_field(value, "item_type").and_then(|s| PrItemType::parse(&s)),
            quantity: decimal_field(value, "quantity"),
            unit_price: decimal_field(value, "unit_price"),
            total_price: decimal_field(value, "total_price"),
        }
    }

    /// Recomputed line total: quantity × unit price.
    #[must_use]
    pub fn computed_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// A project planned (budgeted) item.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectItemRecord {
    /// Record id.
    pub id: String,
    /// Parent project id.
    pub project: String,
    /// Material/work item name.
    pub name: String,
    /// Planned quantity.
    pub quantity: Decimal,
    /// Planned unit price.
    pub unit_price: Decimal,
    /// Planned total price.
    pub total_price: Decimal,
}

impl ProjectItemRecord {
    /// Normalizes a raw `project_items` record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            project: str_field(value, "project"),
            name: str_field(value, "name"),
            quantity: decimal_field(value, "quantity"),
            unit_price: decimal_field(value, "unit_price"),
            total_price: decimal_field(value, "total_price"),
        }
    }
}

/// A notification record.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecord {
    /// Record id.
    pub id: String,
    /// Recipient user id.
    pub user: String,
    /// Short title.
    pub title: String,
    /// Message body.
    pub message: String,
    /// Kind tag; `None` when absent or unrecognized.
    pub kind: Option<NotificationKind>,
    /// Related purchase-request id, when any.
    pub pr_id: Option<String>,
    /// Whether the recipient has read the notification.
    pub is_read: bool,
    /// Creation timestamp, when parseable.
    pub created: Option<DateTime<Utc>>,
}

impl NotificationRecord {
    /// Normalizes a raw `notifications` record.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            user: str_field(value, "user"),
            title: str_field(value, "title"),
            message: str_field(value, "message"),
            kind: opt_str_field(value, "type").and_then(|s| NotificationKind::parse(&s)),
            pr_id: opt_str_field(value, "pr_id"),
            is_read: value.get("is_read").and_then(Value::as_bool).unwrap_or(false),
            created: created_field(value),
        }
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn opt_str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Reads a numeric field, accepting JSON numbers or numeric strings.
///
/// Anything unparseable maps to zero; downstream sums must not be poisoned
/// by one malformed record.
fn decimal_field(value: &Value, key: &str) -> Decimal {
    match value.get(key) {
        Some(Value::Number(n)) => n
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok()))
            .unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse::<Decimal>().unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

/// Parses the backend's `created` field.
///
/// The backend emits a space-separated UTC form (`2024-01-15 08:30:00.000Z`);
/// RFC 3339 is accepted as well.
fn created_field(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.get("created").and_then(Value::as_str)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.3fZ")
                .map(|dt| dt.and_utc())
                .ok()
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|dt| dt.and_utc())
                .ok()
        })
}
