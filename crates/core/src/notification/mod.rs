//! Notification routing for procurement-approval events.
//!
//! Translates a document event (new request, department-head decision,
//! manager decision) into a deduplicated recipient list and persists one
//! notification record per recipient. All backend interaction is
//! best-effort; see [`crate::policy`].

pub mod messages;
pub mod recipients;
pub mod router;
pub mod types;

#[cfg(test)]
mod recipients_props;
#[cfg(test)]
mod tests;

pub use recipients::deliverable_recipients;
pub use router::{DEFAULT_FEED_LIMIT, NotificationRouter};
pub use types::NewNotification;
