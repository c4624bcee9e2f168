//! Input validation helpers
//!
//! Bridges `validator` derive output into the unified error type so handlers
//! surface field-level problems before any store access.

use shared::AppError;
use validator::Validate;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Validate a payload, mapping the first field error into an [`AppError`]
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let mut err = AppError::validation("Validation failed");
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let reason = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                err = err.with_detail(field.to_string(), reason);
            }
        }
        err
    })
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::issue::{Category, IssueCreate};

    #[test]
    fn test_validate_payload_reports_fields() {
        let bad = IssueCreate {
            title: String::new(),
            description: "d".to_string(),
            category: Category::Road,
            location: "somewhere".to_string(),
            image_url: None,
        };
        let err = validate_payload(&bad).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ValidationFailed);
        assert!(err.details.unwrap().contains_key("title"));
    }

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("ok", "field", 10).is_ok());
        assert!(validate_required_text("  ", "field", 10).is_err());
        assert!(validate_required_text("toolongvalue", "field", 5).is_err());
    }
}
