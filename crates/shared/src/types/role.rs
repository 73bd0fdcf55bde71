//! User roles driving notification routing.
//!
//! Roles form a flat enumeration with no hierarchy; routing decisions
//! look only at the role tag on each user record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a user in the procurement workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// System administrator with full visibility.
    TopAdmin,
    /// Department head, first approval stage.
    HeadOfDept,
    /// Manager, final approval stage.
    Manager,
    /// Regular employee raising purchase requests.
    Employee,
}

impl UserRole {
    /// Returns the string representation stored in the backend.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopAdmin => "top_admin",
            Self::HeadOfDept => "head_of_dept",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    /// Parses a role from its backend string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "top_admin" => Some(Self::TopAdmin),
            "head_of_dept" => Some(Self::HeadOfDept),
            "manager" => Some(Self::Manager),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }

    /// Returns true if the role sits on the manager approval tier.
    ///
    /// Top admins approve at the same tier as managers and receive the
    /// same notifications.
    #[must_use]
    pub fn is_manager_tier(&self) -> bool {
        matches!(self, Self::Manager | Self::TopAdmin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
