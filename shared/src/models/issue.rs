//! Issue Model

use crate::issue::{IssueStatus, Priority};
use crate::util::now_millis;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Fixed set of infrastructure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Road,
    Streetlight,
    Water,
    Sanitation,
    Electricity,
    Park,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Road => "road",
            Category::Streetlight => "streetlight",
            Category::Water => "water",
            Category::Sanitation => "sanitation",
            Category::Electricity => "electricity",
            Category::Park => "park",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the staff member assigned to an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRef {
    pub email: String,
    pub name: String,
    pub department: String,
}

/// One entry of the issue's activity timeline
///
/// The timeline is append-only: entries are never edited or removed after
/// being appended. It is the audit log the Activity Timeline view renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub status: IssueStatus,
    pub message: String,
    /// Display name of the actor who caused this transition
    pub updated_by: String,
    pub updater_email: String,
    pub updated_at: i64,
}

/// Issue record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub reporter_email: String,
    pub reporter_name: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: IssueStatus,
    pub priority: Priority,
    /// Emails of citizens who upvoted; set semantics, no duplicates
    #[serde(default)]
    pub upvotes: Vec<String>,
    #[serde(default)]
    pub staff_assigned: Option<StaffRef>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    pub created_at: i64,
}

impl Issue {
    /// Create a new pending issue with the creation timeline entry
    pub fn new(id: i64, reporter_email: &str, reporter_name: &str, data: IssueCreate) -> Self {
        let created_at = now_millis();
        Self {
            id,
            reporter_email: reporter_email.to_string(),
            reporter_name: reporter_name.to_string(),
            title: data.title,
            description: data.description,
            category: data.category,
            location: data.location,
            image_url: data.image_url,
            status: IssueStatus::Pending,
            priority: Priority::Normal,
            upvotes: Vec::new(),
            staff_assigned: None,
            timeline: vec![TimelineEntry {
                status: IssueStatus::Pending,
                message: "Issue reported".to_string(),
                updated_by: reporter_name.to_string(),
                updater_email: reporter_email.to_string(),
                updated_at: created_at,
            }],
            created_at,
        }
    }

    pub fn upvote_count(&self) -> usize {
        self.upvotes.len()
    }
}

/// Report issue payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct IssueCreate {
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    #[validate(length(min = 1, max = 4000))]
    pub description: String,
    pub category: Category,
    #[validate(length(min = 1, max = 300))]
    pub location: String,
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
}

/// Edit issue payload (owner, Pending only)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 150))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 4000))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 300))]
    pub location: Option<String>,
}
