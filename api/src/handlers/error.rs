//! Domain error to HTTP response mapping.
//!
//! Access-class violations (including booking an own item) map to 404
//! rather than 403: the service does not reveal whether the resource
//! exists to callers who may not see it.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use validator::ValidationErrors;

use lh_core::errors::DomainError;
use lh_shared::types::response::ErrorBody;

/// Convert a domain error into the HTTP response the caller sees.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    let (status, code) = match error {
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        DomainError::AccessDenied { .. } => (StatusCode::NOT_FOUND, "ACCESS_DENIED"),
        DomainError::SelfBookingForbidden { .. } => (StatusCode::NOT_FOUND, "SELF_BOOKING"),
        DomainError::Unavailable { .. } => (StatusCode::BAD_REQUEST, "ITEM_UNAVAILABLE"),
        DomainError::InvalidTimeRange { .. } => (StatusCode::BAD_REQUEST, "INVALID_TIME_RANGE"),
        DomainError::AlreadyDecided { .. } => (StatusCode::BAD_REQUEST, "ALREADY_DECIDED"),
        DomainError::UnknownState { .. } => (StatusCode::BAD_REQUEST, "UNKNOWN_STATE"),
        DomainError::CommentNotAllowed { .. } => (StatusCode::BAD_REQUEST, "COMMENT_NOT_ALLOWED"),
        DomainError::EmailTaken { .. } => (StatusCode::CONFLICT, "EMAIL_TAKEN"),
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        DomainError::Database { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        // Store failures are logged in full but reported generically.
        log::error!("internal error: {error}");
        return HttpResponse::build(status)
            .json(ErrorBody::new("internal server error").with_code(code));
    }

    log::warn!("request failed: {error}");
    HttpResponse::build(status).json(ErrorBody::new(error.to_string()).with_code(code))
}

/// Convert DTO validation failures into a 400 response listing the fields.
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{field}: {}", messages.join(", "))
        })
        .collect();

    log::warn!("validation failed: {}", fields.join("; "));
    HttpResponse::BadRequest().json(
        ErrorBody::new(format!("Validation error: {}", fields.join("; ")))
            .with_code("VALIDATION_ERROR"),
    )
}

/// 400 for malformed query parameters (non-positive size and the like).
pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    let message = message.into();
    log::warn!("bad request: {message}");
    HttpResponse::BadRequest().json(ErrorBody::new(message).with_code("VALIDATION_ERROR"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lh_core::domain::entities::booking::BookingStatus;

    #[test]
    fn test_not_found_maps_to_404() {
        let resp = domain_error_response(&DomainError::not_found("booking", 7));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_access_denied_maps_to_404() {
        let resp = domain_error_response(&DomainError::AccessDenied {
            user_id: 1,
            resource: "booking",
            id: 7,
        });
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rule_violations_map_to_400() {
        for error in [
            DomainError::Unavailable { item_id: 1 },
            DomainError::InvalidTimeRange {
                message: "start after end".to_string(),
            },
            DomainError::AlreadyDecided {
                booking_id: 1,
                status: BookingStatus::Approved,
            },
            DomainError::UnknownState {
                value: "SOON".to_string(),
            },
        ] {
            let resp = domain_error_response(&error);
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{error}");
        }
    }

    #[test]
    fn test_email_conflict_maps_to_409() {
        let resp = domain_error_response(&DomainError::EmailTaken {
            email: "ada@example.com".to_string(),
        });
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
