//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::UserNotFound
            | Self::StaffNotFound
            | Self::IssueNotFound
            | Self::PaymentSessionNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::UserAlreadyExists
            | Self::IssueAlreadyAssigned
            | Self::AlreadyHighPriority
            | Self::AlreadyPremium
            | Self::PaymentAlreadyRecorded => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::SessionExpired => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleRequired
            | Self::AdminRequired
            | Self::StaffRequired
            | Self::CitizenRequired
            | Self::UnknownRole
            | Self::UserBlocked
            | Self::NotIssueOwner
            | Self::NotAssignedStaff
            | Self::CannotDeleteCitizen => StatusCode::FORBIDDEN,

            // 402 Payment Required
            Self::ReportLimitReached => StatusCode::PAYMENT_REQUIRED,

            // 422 Unprocessable Entity (state machine refusals)
            Self::IssueNotPending
            | Self::IssueNotAssignable
            | Self::IssueTerminal
            | Self::StatusUnchanged
            | Self::InvalidStatusTarget
            | Self::OwnIssueUpvote
            | Self::IssueNotDeletable
            | Self::PaymentVerificationFailed
            | Self::PaymentCancelled => StatusCode::UNPROCESSABLE_ENTITY,

            // 502 Bad Gateway (upstream provider)
            Self::PaymentProviderError => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::IssueNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::AdminRequired.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::ReportLimitReached.http_status(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            ErrorCode::StatusUnchanged.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
