//! Notification classification tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a notification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A request was approved.
    Approval,
    /// A request was rejected.
    Rejection,
    /// Informational event (e.g., a new request awaiting review).
    Info,
}

impl NotificationKind {
    /// Returns the string representation stored in the backend.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approval => "approval",
            Self::Rejection => "rejection",
            Self::Info => "info",
        }
    }

    /// Parses a kind from its backend string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "approval" => Some(Self::Approval),
            "rejection" => Some(Self::Rejection),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    /// Returns the kind describing an approval decision outcome.
    #[must_use]
    pub fn for_decision(is_approval: bool) -> Self {
        if is_approval {
            Self::Approval
        } else {
            Self::Rejection
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
