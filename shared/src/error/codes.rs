//! Unified error codes for the FixPoint platform
//!
//! This module defines all error codes used across the server, client SDK and
//! frontend. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: User errors
//! - 4xxx: Issue errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1002,
    /// Token is invalid
    TokenInvalid = 1003,
    /// Session has expired
    SessionExpired = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Admin role required
    AdminRequired = 2003,
    /// Staff role required
    StaffRequired = 2004,
    /// Citizen role required
    CitizenRequired = 2005,
    /// Stored role value is not a recognized role
    UnknownRole = 2006,

    // ==================== 3xxx: User ====================
    /// User not found
    UserNotFound = 3001,
    /// User already exists
    UserAlreadyExists = 3002,
    /// Account is blocked
    UserBlocked = 3003,
    /// Staff member not found
    StaffNotFound = 3004,
    /// Staff department is required
    StaffDepartmentRequired = 3005,
    /// Citizen accounts cannot be deleted
    CannotDeleteCitizen = 3006,
    /// Free-tier report limit reached
    ReportLimitReached = 3007,
    /// User already has a premium subscription
    AlreadyPremium = 3008,

    // ==================== 4xxx: Issue ====================
    /// Issue not found
    IssueNotFound = 4001,
    /// Issue is no longer pending
    IssueNotPending = 4002,
    /// Issue already has assigned staff
    IssueAlreadyAssigned = 4003,
    /// Issue cannot be assigned in its current status
    IssueNotAssignable = 4004,
    /// Issue has reached a terminal status
    IssueTerminal = 4005,
    /// Target status equals current status
    StatusUnchanged = 4006,
    /// Status transition target is not legal from the current status
    InvalidStatusTarget = 4007,
    /// Caller does not own this issue
    NotIssueOwner = 4008,
    /// Caller is not the assigned staff for this issue
    NotAssignedStaff = 4009,
    /// Reporters cannot upvote their own issue
    OwnIssueUpvote = 4010,
    /// Issue priority is already High
    AlreadyHighPriority = 4011,
    /// Rejection requires a reason
    RejectReasonRequired = 4012,
    /// Issue cannot be deleted in its current status
    IssueNotDeletable = 4013,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Payment verification failed
    PaymentVerificationFailed = 5002,
    /// Payment was cancelled at checkout
    PaymentCancelled = 5003,
    /// Checkout session not found
    PaymentSessionNotFound = 5004,
    /// Payment has already been recorded
    PaymentAlreadyRecorded = 5005,
    /// Payment provider error
    PaymentProviderError = 5006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "Specific role is required",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::StaffRequired => "Staff role is required",
            ErrorCode::CitizenRequired => "Citizen role is required",
            ErrorCode::UnknownRole => "Stored role value is not recognized",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserAlreadyExists => "User already exists",
            ErrorCode::UserBlocked => "Account is blocked",
            ErrorCode::StaffNotFound => "Staff member not found",
            ErrorCode::StaffDepartmentRequired => "Staff department is required",
            ErrorCode::CannotDeleteCitizen => "Citizen accounts cannot be deleted",
            ErrorCode::ReportLimitReached => {
                "Free report limit reached, subscribe to report more issues"
            }
            ErrorCode::AlreadyPremium => "User already has a premium subscription",

            // Issue
            ErrorCode::IssueNotFound => "Issue not found",
            ErrorCode::IssueNotPending => "Issue is no longer pending",
            ErrorCode::IssueAlreadyAssigned => "Issue already has assigned staff",
            ErrorCode::IssueNotAssignable => "Issue cannot be assigned in its current status",
            ErrorCode::IssueTerminal => "Issue has reached a terminal status",
            ErrorCode::StatusUnchanged => "Issue already has this status",
            ErrorCode::InvalidStatusTarget => "Status transition is not legal",
            ErrorCode::NotIssueOwner => "Only the reporter can perform this action",
            ErrorCode::NotAssignedStaff => "Only the assigned staff can update this issue",
            ErrorCode::OwnIssueUpvote => "Reporters cannot upvote their own issue",
            ErrorCode::AlreadyHighPriority => "Issue priority is already High",
            ErrorCode::RejectReasonRequired => "Rejection requires a reason",
            ErrorCode::IssueNotDeletable => "Issue cannot be deleted in its current status",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentVerificationFailed => {
                "Payment verification failed, please contact support"
            }
            ErrorCode::PaymentCancelled => "Payment was cancelled, please try again",
            ErrorCode::PaymentSessionNotFound => "Checkout session not found",
            ErrorCode::PaymentAlreadyRecorded => "Payment has already been recorded",
            ErrorCode::PaymentProviderError => "Payment provider error",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::TokenExpired),
            1003 => Ok(ErrorCode::TokenInvalid),
            1004 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            2004 => Ok(ErrorCode::StaffRequired),
            2005 => Ok(ErrorCode::CitizenRequired),
            2006 => Ok(ErrorCode::UnknownRole),

            // User
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::UserAlreadyExists),
            3003 => Ok(ErrorCode::UserBlocked),
            3004 => Ok(ErrorCode::StaffNotFound),
            3005 => Ok(ErrorCode::StaffDepartmentRequired),
            3006 => Ok(ErrorCode::CannotDeleteCitizen),
            3007 => Ok(ErrorCode::ReportLimitReached),
            3008 => Ok(ErrorCode::AlreadyPremium),

            // Issue
            4001 => Ok(ErrorCode::IssueNotFound),
            4002 => Ok(ErrorCode::IssueNotPending),
            4003 => Ok(ErrorCode::IssueAlreadyAssigned),
            4004 => Ok(ErrorCode::IssueNotAssignable),
            4005 => Ok(ErrorCode::IssueTerminal),
            4006 => Ok(ErrorCode::StatusUnchanged),
            4007 => Ok(ErrorCode::InvalidStatusTarget),
            4008 => Ok(ErrorCode::NotIssueOwner),
            4009 => Ok(ErrorCode::NotAssignedStaff),
            4010 => Ok(ErrorCode::OwnIssueUpvote),
            4011 => Ok(ErrorCode::AlreadyHighPriority),
            4012 => Ok(ErrorCode::RejectReasonRequired),
            4013 => Ok(ErrorCode::IssueNotDeletable),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentVerificationFailed),
            5003 => Ok(ErrorCode::PaymentCancelled),
            5004 => Ok(ErrorCode::PaymentSessionNotFound),
            5005 => Ok(ErrorCode::PaymentAlreadyRecorded),
            5006 => Ok(ErrorCode::PaymentProviderError),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        // General
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        // Auth
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::TokenExpired.code(), 1002);
        assert_eq!(ErrorCode::TokenInvalid.code(), 1003);

        // Permission
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::UnknownRole.code(), 2006);

        // User
        assert_eq!(ErrorCode::UserNotFound.code(), 3001);
        assert_eq!(ErrorCode::UserBlocked.code(), 3003);
        assert_eq!(ErrorCode::ReportLimitReached.code(), 3007);

        // Issue
        assert_eq!(ErrorCode::IssueNotFound.code(), 4001);
        assert_eq!(ErrorCode::StatusUnchanged.code(), 4006);
        assert_eq!(ErrorCode::AlreadyHighPriority.code(), 4011);

        // Payment
        assert_eq!(ErrorCode::PaymentVerificationFailed.code(), 5002);
        assert_eq!(ErrorCode::PaymentCancelled.code(), 5003);

        // System
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::IssueNotFound.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(4001), Ok(ErrorCode::IssueNotFound));
        assert_eq!(ErrorCode::try_from(5003), Ok(ErrorCode::PaymentCancelled));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
        assert_eq!(ErrorCode::try_from(4099), Err(InvalidErrorCode(4099)));
    }

    #[test]
    fn test_serialize() {
        let code = ErrorCode::NotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "3");

        let code = ErrorCode::IssueNotFound;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "4001");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::IssueNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::PermissionDenied,
            ErrorCode::IssueNotFound,
            ErrorCode::PaymentVerificationFailed,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::UserNotFound.message(), "User not found");
        assert_eq!(ErrorCode::IssueNotFound.message(), "Issue not found");
        assert_eq!(
            ErrorCode::OwnIssueUpvote.message(),
            "Reporters cannot upvote their own issue"
        );
    }
}
