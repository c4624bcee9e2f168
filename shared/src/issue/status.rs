//! Issue status and priority enums

use serde::{Deserialize, Serialize};
use std::fmt;

/// Issue status
///
/// Wire format matches the dashboard labels ("In-Progress" keeps its
/// hyphen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    Pending,
    #[serde(rename = "In-Progress")]
    InProgress,
    Working,
    Resolved,
    Closed,
    Rejected,
}

impl IssueStatus {
    /// Terminal statuses accept no further status transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, IssueStatus::Closed | IssueStatus::Rejected)
    }

    /// Statuses an issue can still be worked in
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            IssueStatus::Pending | IssueStatus::InProgress | IssueStatus::Working
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "Pending",
            IssueStatus::InProgress => "In-Progress",
            IssueStatus::Working => "Working",
            IssueStatus::Resolved => "Resolved",
            IssueStatus::Closed => "Closed",
            IssueStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<IssueStatus> {
        match raw {
            "Pending" => Some(IssueStatus::Pending),
            "In-Progress" => Some(IssueStatus::InProgress),
            "Working" => Some(IssueStatus::Working),
            "Resolved" => Some(IssueStatus::Resolved),
            "Closed" => Some(IssueStatus::Closed),
            "Rejected" => Some(IssueStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority flag, orthogonal to status
///
/// Becomes High only through a verified boost payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "Normal",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
