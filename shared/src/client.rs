//! Wire DTOs shared by the server handlers and the client SDK

use crate::issue::IssueStatus;
use crate::models::{PaymentKind, User};
use serde::{Deserialize, Serialize};

// ========== Issue actions ==========

/// Admin assigns a staff member to an issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    pub staff_email: String,
}

/// Admin rejects a pending issue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

/// Staff/admin status update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: IssueStatus,
}

/// Admin block/unblock toggle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRequest {
    pub blocked: bool,
}

// ========== Payments ==========

/// Start a provider checkout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionRequest {
    pub kind: PaymentKind,
    /// Required for boost payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<i64>,
}

/// Provider checkout session; the URL is opaque to us
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSessionResponse {
    pub session_id: String,
    pub url: String,
}

/// Verify a checkout session after the provider redirect
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub session_id: String,
}

// ========== Stats ==========

/// Issue counts by status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStats {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub working: u64,
    pub resolved: u64,
    pub closed: u64,
    pub rejected: u64,
}

impl IssueStats {
    /// Accumulate one issue's status into the counters
    pub fn record(&mut self, status: IssueStatus) {
        self.total += 1;
        match status {
            IssueStatus::Pending => self.pending += 1,
            IssueStatus::InProgress => self.in_progress += 1,
            IssueStatus::Working => self.working += 1,
            IssueStatus::Resolved => self.resolved += 1,
            IssueStatus::Closed => self.closed += 1,
            IssueStatus::Rejected => self.rejected += 1,
        }
    }
}

/// Admin dashboard aggregates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminStats {
    pub issues: IssueStats,
    pub total_users: u64,
    pub total_staff: u64,
    pub premium_users: u64,
}

// ========== Users ==========

/// Wrapper for user list responses that also reports the roster size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    pub total: u64,
    pub users: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_stats_record() {
        let mut stats = IssueStats::default();
        stats.record(IssueStatus::Pending);
        stats.record(IssueStatus::Pending);
        stats.record(IssueStatus::Resolved);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.working, 0);
    }

    #[test]
    fn test_checkout_request_wire_format() {
        let req = CheckoutSessionRequest {
            kind: PaymentKind::Boost,
            issue_id: Some(42),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"kind\":\"boost\""));
        assert!(json.contains("\"issue_id\":42"));
    }
}
