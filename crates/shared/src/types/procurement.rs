//! Procurement document classification tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag of a purchase request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrType {
    /// Request linked to a project's own budget.
    Project,
    /// Subcontractor request drawing down a project's planned items.
    Sub,
    /// General request outside any project budget.
    Other,
}

impl PrType {
    /// Returns the string representation stored in the backend.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Sub => "sub",
            Self::Other => "other",
        }
    }

    /// Parses a type tag from its backend string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "project" => Some(Self::Project),
            "sub" => Some(Self::Sub),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a purchase request in the approval workflow.
///
/// Requests progress pending → head_approved → approved, or end at
/// rejected from either approval stage. Only `Approved` subcontractor
/// requests count toward budget withdrawals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrStatus {
    /// Awaiting the department-head decision.
    Pending,
    /// Approved by the department head, awaiting the manager decision.
    HeadApproved,
    /// Fully approved.
    Approved,
    /// Rejected at either stage.
    Rejected,
}

impl PrStatus {
    /// Returns the string representation stored in the backend.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::HeadApproved => "head_approved",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from its backend string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "head_approved" => Some(Self::HeadApproved),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for PrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type tag of a purchase-request line item.
///
/// Legacy records carry no tag at all; consumers treat an absent tag as
/// `Regular`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrItemType {
    /// Ordinary line item drawing against a planned budget item.
    Regular,
    /// Contingency spending tracked outside planned-item withdrawals.
    Reserve,
}

impl PrItemType {
    /// Returns the string representation stored in the backend.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Reserve => "reserve",
        }
    }

    /// Parses an item type from its backend string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "regular" => Some(Self::Regular),
            "reserve" => Some(Self::Reserve),
            _ => None,
        }
    }
}

impl fmt::Display for PrItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
