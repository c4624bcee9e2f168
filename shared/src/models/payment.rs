//! Payment Model
//!
//! Payments are recorded by the server's verify handler once the payment
//! provider confirms a checkout session. Read-only thereafter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Boost price in currency units
pub const BOOST_PRICE: i64 = 100;
/// Subscription price in currency units
pub const SUBSCRIPTION_PRICE: i64 = 1000;
/// Maximum open reports for non-premium citizens
pub const FREE_REPORT_LIMIT: u32 = 3;

/// Payment kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// Raise one issue's priority to High
    Boost,
    /// Remove the free-tier report cap for the user
    Subscription,
}

impl PaymentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentKind::Boost => "boost",
            PaymentKind::Subscription => "subscription",
        }
    }

    /// Fixed price for this payment kind
    pub fn amount(&self) -> i64 {
        match self {
            PaymentKind::Boost => BOOST_PRICE,
            PaymentKind::Subscription => SUBSCRIPTION_PRICE,
        }
    }
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completed payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub user_email: String,
    pub user_name: String,
    pub kind: PaymentKind,
    pub amount: i64,
    /// Provider transaction id; unique, makes verification idempotent
    pub transaction_id: String,
    /// Present only for boost payments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<i64>,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_amounts() {
        assert_eq!(PaymentKind::Boost.amount(), 100);
        assert_eq!(PaymentKind::Subscription.amount(), 1000);
    }

    #[test]
    fn test_kind_wire_format() {
        assert_eq!(serde_json::to_string(&PaymentKind::Boost).unwrap(), "\"boost\"");
        let kind: PaymentKind = serde_json::from_str("\"subscription\"").unwrap();
        assert_eq!(kind, PaymentKind::Subscription);
    }
}
